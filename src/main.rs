use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use feednorm::{Config, FeedParser};

#[derive(Parser, Debug)]
#[command(
    name = "feednorm",
    about = "Normalize RSS, RDF and Atom feeds into Atom-shaped JSON"
)]
struct Args {
    /// Feed document to read, or "-" for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// TOML config file (max_depth, [namespaces])
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra namespace mapping, may be repeated
    #[arg(long = "namespace", value_name = "URI=PREFIX", value_parser = parse_mapping)]
    namespaces: Vec<(String, String)>,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Print diagnostics to stderr
    #[arg(long)]
    diagnostics: bool,
}

/// Splits `URI=PREFIX` on the last `=`, since URIs may contain one.
fn parse_mapping(raw: &str) -> Result<(String, String), String> {
    match raw.rsplit_once('=') {
        Some((uri, prefix)) if !uri.is_empty() && !prefix.is_empty() => {
            Ok((uri.to_string(), prefix.to_string()))
        }
        _ => Err(format!("expected URI=PREFIX, got {raw:?}")),
    }
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if input.as_os_str() == "-" {
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read feed from stdin")?;
    } else {
        let file = std::fs::File::open(input)
            .with_context(|| format!("Failed to open '{}'", input.display()))?;
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read '{}'", input.display()))?;
    }
    Ok(bytes)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };

    let mut parser = FeedParser::from_config(&config);
    for (uri, prefix) in &args.namespaces {
        if !parser.register_namespace(uri, prefix) {
            bail!("Cannot map namespace {uri} to prefix {prefix:?}");
        }
    }

    let bytes = read_input(&args.input)?;
    let parsed = parser
        .parse_with_diagnostics(bytes.as_slice())
        .with_context(|| format!("Failed to parse '{}'", args.input.display()))?;

    if args.diagnostics {
        for diagnostic in &parsed.diagnostics {
            let level = if diagnostic.is_warning() { "warning" } else { "note" };
            eprintln!("{level}: {diagnostic}");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.compact {
        serde_json::to_writer(&mut out, &parsed.feed)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &parsed.feed)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping_splits_on_last_equals() {
        assert_eq!(
            parse_mapping("http://x/?a=b=ex").unwrap(),
            ("http://x/?a=b".to_string(), "ex".to_string())
        );
    }

    #[test]
    fn test_parse_mapping_rejects_missing_parts() {
        assert!(parse_mapping("http://x/").is_err());
        assert!(parse_mapping("=ex").is_err());
        assert!(parse_mapping("http://x/=").is_err());
    }
}
