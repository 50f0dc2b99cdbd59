//! sift: query JSON element trees with CSS selectors.
//!
//! - `sift parse 'ul > li.active'` prints the canonical selector
//! - `sift query page.json 'ul > li'` prints the path of every match
//! - `sift tree page.json` prints the loaded tree

mod document;
mod render;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sift_dom::NodeId;
use sift_selector::{SelectorList, parse_selector};
use tracing::info;
use tracing_subscriber::EnvFilter;

use render::Palette;

/// sift: CSS selector queries over JSON element trees
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Canonical form of a selector
    sift parse 'div.a>p ,#x'

    # Expression tree as JSON
    sift parse --json 'ul > li + li'

    # Every match in a document
    sift query page.json '.menu > li'

    # First match only
    sift query --first page.json 'li.active'

    # Dump the loaded tree
    sift tree page.json
"#)]
struct Cli {
    /// Log parse and match detail to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a selector and print its canonical form
    Parse {
        /// Selector list to parse
        selector: String,

        /// Print the expression tree as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the element path of every match in a document
    Query {
        /// JSON document to search
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,

        /// Selector list to match
        selector: String,

        /// Stop at the first match
        #[arg(long)]
        first: bool,
    },

    /// Print a document's node tree
    Tree {
        /// JSON document to print
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let palette = Palette::new(!cli.no_color && io::stdout().is_terminal());
    match run(cli.command, palette) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", palette.error("error:"));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command, palette: Palette) -> Result<ExitCode> {
    match command {
        Command::Parse { selector, json } => {
            let list = parse_reported(&selector, palette)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                println!("{list}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Query {
            document,
            selector,
            first,
        } => {
            let list = parse_reported(&selector, palette)?;
            let tree = document::load(&document)?;

            let found = if first {
                list.query_first(&tree, NodeId::ROOT).into_iter().collect()
            } else {
                list.query_all(&tree, NodeId::ROOT)
            };
            info!(selector = %list, matched = found.len(), "query finished");

            for id in &found {
                println!("{}", render::element_path(&tree, *id, palette));
            }
            // Like grep: no match is a failure.
            Ok(if found.is_empty() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Tree { document } => {
            let tree = document::load(&document)?;
            print!("{}", render::tree_dump(&tree, NodeId::ROOT, palette));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Parse `selector`, showing where it went wrong on stderr.
fn parse_reported(selector: &str, palette: Palette) -> Result<SelectorList> {
    parse_selector(selector)
        .inspect_err(|err| eprintln!("{}", render::syntax_error(selector, err, palette)))
        .context("invalid selector")
}
