/*!
Main binary for jsonkeys.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{LevelFilter, debug};
use serde::Serialize;
use std::io::{self, IsTerminal, stdout};
use std::path::PathBuf;

use jsonkeys::input::{Document, InputFormat, Source, decode};
use jsonkeys::{JsonNode, JsonSearch, KeyChain, utils};

/// Search a JSON document for the values bound to a key, or to a chain of
/// keys, without a schema.
#[derive(Parser)]
#[command(name = "jk", version, about, arg_required_else_help = true, long_about = None, disable_help_subcommand = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
    /// Do not pretty-print the JSON output, instead use compact
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    compact: bool,
    /// Display count of number of matches
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    count: bool,
    /// Display depth of the input document
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    depth: bool,
    /// Do not display matched JSON values
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    no_display: bool,
    /// Input format. Inferred from the file extension if omitted, else JSON
    #[arg(long, global = true, value_enum)]
    format: Option<InputFormat>,
    /// Log every work-list push and pop (implies trace-level logging for
    /// the search internals)
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    trace: bool,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Available subcommands for `jk`
#[derive(Subcommand)]
enum Commands {
    /// Find every value bound to KEY, at any depth (depth-first).
    All {
        /// Key to search for
        key: String,
        /// Optional path to input file. If omitted or `-`, reads from STDIN
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Follow an ordered chain of keys level by level (breadth-first).
    ///
    /// A single argument is always split on `.`, so `a.b.c` is a chain of
    /// three keys. A lone key that itself contains a dot cannot be given this
    /// way; pass it alongside at least one other key instead.
    Chain {
        /// Keys of the chain, front first
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,
        /// Optional path to input file. If omitted or `-`, reads from STDIN
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Generate shell completions for the given shell to stdout.
    Completions { shell: clap_complete::Shell },
}

/// What to search for.
enum Target {
    Key(String),
    Chain(KeyChain),
}

/// Output and search settings shared by both searches.
struct Options {
    compact: bool,
    count: bool,
    depth: bool,
    no_display: bool,
    format: Option<InputFormat>,
    search: JsonSearch,
}

/// Entry point for main binary.
///
/// This parses the command line arguments and runs the requested search. If
/// no file is given, the input is read from STDIN. Results are printed to
/// STDOUT, one JSON value per match.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    if !stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let options = Options {
        compact: args.compact,
        count: args.count,
        depth: args.depth,
        no_display: args.no_display,
        format: args.format,
        search: JsonSearch::new()
            .with_stack_trace(args.trace)
            .with_queue_trace(args.trace),
    };

    let (target, input) = match args.command {
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            generate(shell, &mut cmd, "jk", &mut stdout().lock());
            return Ok(());
        }
        Commands::All { key, input } => (Target::Key(key), input),
        Commands::Chain { keys, input } => {
            let chain = if let [dotted] = keys.as_slice() {
                dotted
                    .parse::<KeyChain>()
                    .with_context(|| "Failed to parse key chain")?
            } else {
                KeyChain::new(keys)
            };
            (Target::Chain(chain), input)
        }
    };

    // `-` names standard input explicitly
    let input = input.filter(|path| path.as_os_str() != "-");
    let source = match input.as_deref() {
        Some(path) => Source::from_file(path)?,
        None => {
            if io::stdin().is_terminal() {
                // No piped input and no file specified
                let mut cmd = Args::command();
                return Ok(cmd.print_help()?);
            }
            Source::from_stdin()?
        }
    };

    let format = options
        .format
        .or_else(|| input.as_deref().and_then(InputFormat::from_path))
        .unwrap_or_default();

    match decode(&source, format)? {
        Document::Borrowed(root) => report(&options, &target, &root),
        Document::Owned(root) => report(&options, &target, &root),
    }
}

/// Configures `env_logger` from the verbosity flags and `RUST_LOG`.
fn init_logger(args: &Args) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(args.verbose.log_level_filter());
    if args.trace {
        builder.filter_module("jsonkeys::search::worklist", LevelFilter::Trace);
    }
    builder.parse_default_env();
    // A logger can only be installed once per process
    builder.try_init().ok();
}

/// Runs the search and prints the requested output.
fn report<N: JsonNode + Serialize>(
    options: &Options,
    target: &Target,
    root: &N,
) -> Result<()> {
    let results = match target {
        Target::Key(key) => options.search.find_all(root, key),
        Target::Chain(chain) => options
            .search
            .find_chain(root, chain.keys())
            .with_context(|| format!("Failed to follow key chain `{chain}`"))?,
    };
    debug!("{} result(s)", results.len());

    if options.count {
        println!("Found matches: {}", results.len());
    }

    if options.depth {
        println!("Depth: {}", jsonkeys::depth(root));
    }

    if !options.no_display {
        let mut out = stdout().lock();
        for value in results {
            utils::write_colored_result(&mut out, value, !options.compact)?;
        }
    }

    Ok(())
}
