//! `jfilter` CLI: apply, canonicalise and inspect JSON filter specifications.
//!
//! ## Usage
//!
//! ```sh
//! # Keep only some fields (stdin → stdout)
//! echo '{"name":"Alice","age":30,"etag":"x"}' | jfilter apply -f name,age
//!
//! # Remove fields, file to file, pretty-printed
//! jfilter apply -f '-feeders(assets(connections))' -i network.json -o out.json --pretty
//!
//! # Print the canonical form of a filter
//! jfilter canonical 'a(c,b),a.d'          # a(b,c,d)
//!
//! # Extract a sub-filter by dotted path
//! jfilter subfilter '-a(b(c,d),e)' a.b     # b(c,d)
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=json_filter=trace`) or pass `--verbose` to
//! see diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use json_filter::{apply_filter, FilterSpecification};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jfilter", version, about = "Apply JSON filter specifications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a JSON document
    Apply {
        /// Filter specification, e.g. `a.b,c(d,e)` or `-a.b`
        #[arg(short, long, allow_hyphen_values = true)]
        filter: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the filtered JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the canonical form of a filter specification
    Canonical {
        /// Filter specification
        #[arg(allow_hyphen_values = true)]
        filter: String,
        /// Also print the number of nodes in the filter tree
        #[arg(long)]
        count: bool,
    },
    /// Print the sub-filter found at a dotted path
    Subfilter {
        /// Filter specification
        #[arg(allow_hyphen_values = true)]
        filter: String,
        /// Dotted path to the sub-filter, e.g. `feeders.assets`
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Apply {
            filter,
            input,
            output,
            pretty,
        } => {
            let spec = parse_filter(&filter)?;
            let json = read_input(input.as_deref())?;
            let mut value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse input JSON")?;

            apply_filter(&mut value, &spec);

            let rendered = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Canonical { filter, count } => {
            let spec = parse_filter(&filter)?;
            println!("{}", spec);
            if count {
                println!("{}", spec.root().count_all_nodes());
            }
        }
        Commands::Subfilter { filter, path } => {
            let spec = parse_filter(&filter)?;
            match spec.subfilter(&path) {
                Some(sub) => println!("{}", sub),
                None => {
                    eprintln!("No sub-filter at '{}'", path);
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "json_filter=debug,jfilter=debug"
    } else {
        "jfilter=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn parse_filter(filter: &str) -> Result<FilterSpecification> {
    let spec = FilterSpecification::parse(filter).context("Invalid filter specification")?;
    tracing::debug!(canonical = %spec, "using filter");
    Ok(spec)
}

/// Read the whole document from `path`, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    };
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write the filtered document to `path`, or as one line on stdout.
fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write file: {}", path.display())),
        None => writeln!(io::stdout().lock(), "{rendered}").context("Failed to write to stdout"),
    }
}
