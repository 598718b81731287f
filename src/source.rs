//! Assembler source files loaded fully into memory.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while loading a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot open source file '{path}': {source}")]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One line of source text with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// A source file held in memory as numbered lines.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    lines: Vec<SourceLine>,
}

impl SourceFile {
    /// Read `path` into memory, one entry per line, numbered from 1.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::CannotOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let text = line.map_err(|source| SourceError::CannotOpen {
                path: path.to_path_buf(),
                source,
            })?;
            lines.push(SourceLine {
                number: index + 1,
                text,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 0-based access; the line numbers stored inside are 1-based.
    pub fn line(&self, index: usize) -> Option<&SourceLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &SourceLine> {
        self.lines.iter()
    }

    /// Write the numbered listing: each line number left-aligned in an
    /// eight-column field, followed by the line text.
    pub fn write_listing(&self, writer: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{:<8}{}", line.number, line.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_pads_numbers_to_eight_columns() {
        let source = SourceFile {
            path: PathBuf::from("demo.s"),
            lines: vec![
                SourceLine {
                    number: 1,
                    text: "nop".to_string(),
                },
                SourceLine {
                    number: 2,
                    text: "halt".to_string(),
                },
            ],
        };

        let mut rendered = Vec::new();
        source.write_listing(&mut rendered).unwrap();
        assert_eq!(
            String::from_utf8(rendered).unwrap(),
            "1       nop\n2       halt\n"
        );
    }
}
