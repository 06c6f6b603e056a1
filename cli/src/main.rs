use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Read, Write};

use clap::{Parser, ValueEnum};
use serde_php::{DecodeOptions, RenderMode, RenderOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "phpser", version, about = "Decode PHP serialize() output")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Output notation: json, var-export (default: json).
    #[arg(short, long, value_enum, value_name = "format", default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// JSON indentation size; 0 prints compact JSON (default: 4).
    #[arg(long, value_name = "number", default_value_t = 4)]
    indent: usize,

    /// Strip one pair of quotes wrapping the whole input, as left behind by
    /// copying a string literal out of source code or a log line.
    #[arg(long = "trim-quotes")]
    trim_quotes: bool,

    /// Ignore bytes after the first complete value instead of failing.
    #[arg(long = "allow-trailing")]
    allow_trailing: bool,

    /// Maximum nesting depth of arrays and objects.
    #[arg(long = "max-depth", value_name = "number")]
    max_depth: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    VarExport,
}

impl From<FormatArg> for RenderMode {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => RenderMode::Json,
            FormatArg::VarExport => RenderMode::VarExport,
        }
    }
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    fn from_arg(input: Option<&str>) -> Self {
        match input {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_string()),
        }
    }

    fn read(&self) -> io::Result<String> {
        match self {
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            InputSource::File(path) => fs::read_to_string(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::File(path) => f.write_str(path),
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let source = InputSource::from_arg(args.input.as_deref());
    let raw = source.read()?;
    debug!(%source, bytes = raw.len(), "read input");

    let input = prepare_input(&raw, args.trim_quotes);

    let mut options = DecodeOptions::new().with_allow_trailing(args.allow_trailing);
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }
    let value = serde_php::decode_with_options(input, &options)
        .map_err(|err| format!("conversion error: {err}"))?;

    let render_options = RenderOptions::new()
        .with_mode(args.format.into())
        .with_indent(args.indent);
    let rendered = serde_php::render(&value, &render_options);

    match args.output.as_deref().filter(|path| *path != "-") {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("✔ Decoded {source} → {path}");
        }
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

/// Serialized text starts with a tag and ends with `;` or `}`, so surrounding
/// whitespace such as a file's final newline is never part of it.
fn prepare_input(raw: &str, trim_quotes: bool) -> &str {
    let text = raw.trim_matches(|ch: char| ch.is_ascii_whitespace());
    if trim_quotes {
        trim_wrapping_quotes(text)
    } else {
        text
    }
}

/// Removes one pair of matching `'` or `"` around the whole text. Text of two
/// characters or less is left alone.
fn trim_wrapping_quotes(input: &str) -> &str {
    for quote in ['\'', '"'] {
        if input.len() > 2 && input.starts_with(quote) && input.ends_with(quote) {
            return &input[1..input.len() - 1];
        }
    }
    input
}
