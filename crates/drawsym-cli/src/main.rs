use drawsym_core::{Converter, DrawsymConfig, SymbolRegistry, extract_symbols};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Help,
    Usage(String),
    Core(drawsym_core::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Help => write!(f, "{}", usage()),
            CliError::Usage(reason) => {
                write!(f, "error: {reason} (run with --help for usage)")
            }
            CliError::Core(err) => write!(f, "Error: {err}"),
        }
    }
}

impl From<drawsym_core::Error> for CliError {
    fn from(value: drawsym_core::Error) -> Self {
        Self::Core(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Extract,
    Generate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    symbols: Option<PathBuf>,
    preserve_fallback_dimensions: bool,
    verbosity: Verbosity,
    positional: Vec<String>,
}

fn usage() -> &'static str {
    "drawsym-cli\n\
\n\
USAGE:\n\
  drawsym-cli extract [--assets <dir>] [--out <path>] [--config <path>] [-q|-v]\n\
  drawsym-cli generate [--symbols <path>] [--config <path>] [--keep-fallback-size] [-q|-v] <input.json> <output.xml>\n\
\n\
NOTES:\n\
  - extract scans <dir> (default: ./assets) and writes the symbol registry (default: ./symbols.json).\n\
  - generate reads the registry written by extract; run extract first.\n\
  - Log verbosity can also be set with DRAWSYM_LOG (error|warn|info|debug|trace).\n\
"
}

fn next_path<'a>(
    flag: &str,
    it: &mut impl Iterator<Item = &'a String>,
) -> Result<PathBuf, CliError> {
    it.next()
        .map(PathBuf::from)
        .ok_or_else(|| CliError::Usage(format!("{flag} expects a path")))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Help),
            "extract" if args.positional.is_empty() => args.command = Command::Extract,
            "generate" if args.positional.is_empty() => args.command = Command::Generate,
            "--config" => args.config = Some(next_path(a, &mut it)?),
            "--assets" => args.assets = Some(next_path(a, &mut it)?),
            "--out" | "--symbols" => args.symbols = Some(next_path(a, &mut it)?),
            "--keep-fallback-size" => args.preserve_fallback_dimensions = true,
            "--quiet" | "-q" => args.verbosity = Verbosity::Quiet,
            "--verbose" | "-v" => args.verbosity = Verbosity::Verbose,
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(format!("unknown option {other}")));
            }
            path => args.positional.push(path.to_string()),
        }
    }

    match (args.command, args.positional.len()) {
        (Command::Extract, 0) | (Command::Generate, 2) => {}
        (Command::Extract, _) => {
            return Err(CliError::Usage(format!(
                "extract takes no positional arguments, got {}",
                args.positional.join(" ")
            )));
        }
        (Command::Generate, n) => {
            return Err(CliError::Usage(format!(
                "expected <input.json> <output.xml>, got {n} path(s)"
            )));
        }
    }
    Ok(args)
}

fn init_tracing(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "debug",
    };
    let filter = EnvFilter::try_from_env("DRAWSYM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from an embedding harness) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(args: &Args) -> Result<DrawsymConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => DrawsymConfig::load(path)?,
        None => DrawsymConfig::default(),
    };
    if let Some(assets) = &args.assets {
        config.assets_dir = assets.clone();
    }
    if let Some(symbols) = &args.symbols {
        config.symbols_path = symbols.clone();
    }
    if args.preserve_fallback_dimensions {
        config.preserve_fallback_dimensions = true;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;

    match args.command {
        Command::Extract => {
            let build = extract_symbols(&config)?;
            if build.stats.files_scanned == 0 {
                tracing::warn!(
                    "no diagram files found in {}",
                    config.assets_dir.display()
                );
            }
            println!(
                "Extracted {} symbols to {}",
                build.stats.shapes_processed,
                config.symbols_path.display()
            );
            Ok(())
        }
        Command::Generate => {
            let input = PathBuf::from(&args.positional[0]);
            let output = PathBuf::from(&args.positional[1]);
            let registry = SymbolRegistry::load(&config.symbols_path)?;
            let converter = Converter::new(registry).with_config(config);
            let converted = converter.convert_file(&input, &output)?;
            if !converted.diagnostics.is_empty() {
                tracing::info!(
                    count = converted.diagnostics.len(),
                    "generation finished with diagnostics"
                );
            }
            println!("Generated BPMN diagram at {}", output.display());
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Help) => {
            print!("{}", usage());
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(args.verbosity);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
