//! The kasm driver: parse the command line, load the source file, and
//! write the numbered listing. The assembler passes are not implemented
//! yet; the driver validates its inputs and reports what it would run.

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kasm::args::{CommandLine, ParamDef};
use kasm::source::SourceFile;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

/// The CLI surface of the assembler driver.
fn declare_params() -> CommandLine {
    let mut args = CommandLine::new();
    args.register(ParamDef::flag(Some('v'), "verbose", "Enable verbose diagnostics"));
    args.register(ParamDef::string(Some('o'), "out", "Output image path").mandatory());
    args.register(ParamDef::string(Some('l'), "lst", "Write the numbered listing to this file"));
    args.register(
        ParamDef::int(Some('j'), "threads", "Worker threads for the assembler passes", 1)
            .with_range(1, 16),
    );
    args
}

fn print_usage(args: &CommandLine) {
    eprintln!("Usage: kasm [options] <source-file>");
    eprintln!();
    eprint!("{}", args.usage());
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    // The verbose flag also raises the log filter fallback, so peek at it
    // before the real parse runs.
    let verbose_hint = raw.iter().any(|t| t == "-v" || t == "--verbose");
    init_tracing(verbose_hint);

    let mut args = declare_params();
    if let Err(error) = args.parse(&raw) {
        print_usage(&args);
        return Err(error).context("Failed to parse the command line");
    }

    if args.find("verbose").is_some_and(|p| p.as_bool()) {
        for p in args.params() {
            eprintln!("{} = {}", p.name(), p.as_str());
        }
        for arg in args.positionals() {
            eprintln!("argument: {}", arg);
        }
    }

    let positionals = args.positionals();
    if positionals.len() != 1 {
        print_usage(&args);
        bail!("Expected exactly one source file, found {}", positionals.len());
    }
    let source_path = &positionals[0];

    let out = args
        .find("out")
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let threads = args.find("threads").map_or(1, |p| p.as_int());
    debug!(out = %out, threads, "Assembler configuration");

    let source = SourceFile::load(source_path).context("Failed to load the source file")?;
    info!(path = %source_path, lines = source.line_count(), "Loaded source file");

    let stdout = std::io::stdout();
    source
        .write_listing(&mut stdout.lock())
        .context("Failed to write the listing")?;

    if let Some(lst_path) = args
        .find("lst")
        .and_then(|p| p.is_set().then(|| p.as_str().to_string()))
    {
        let mut file = std::fs::File::create(&lst_path)
            .with_context(|| format!("Cannot create listing file '{}'", lst_path))?;
        source
            .write_listing(&mut file)
            .with_context(|| format!("Failed to write listing file '{}'", lst_path))?;
        debug!(path = %lst_path, "Wrote listing file");
    }

    Ok(())
}
