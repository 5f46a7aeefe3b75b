use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;

use crate::core::{Engine, TraceRequest};

#[derive(Parser)]
#[command(name = "metatrace")]
#[command(about = "Rebuilds and displays template instantiation call graphs from compiler traces")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that reads a trace
#[derive(clap::Args, Debug, Clone)]
pub struct TraceArgs {
    /// Trace file to read
    pub trace: PathBuf,

    /// Keep every instantiation, including substitution bookkeeping
    #[arg(long)]
    pub full: bool,

    /// Fail on compressed names and unnamed file ids
    #[arg(long)]
    pub strict: bool,

    /// Label of the root node (the evaluated expression)
    #[arg(long)]
    pub root_name: Option<String>,

    /// Type the evaluated expression produced
    #[arg(long)]
    pub result: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the instantiation call graph as a tree
    #[command(visible_alias = "ft")]
    Forwardtrace {
        #[command(flatten)]
        args: TraceArgs,

        /// Terminal width to wrap at (0 or 1 disables wrapping)
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Summarize the instantiations in a trace
    Stats {
        #[command(flatten)]
        args: TraceArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the reconstructed metaprogram as JSON
    Dump {
        #[command(flatten)]
        args: TraceArgs,
    },

    /// Write a default configuration file
    Init {
        /// Target directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl From<TraceArgs> for TraceRequest {
    fn from(args: TraceArgs) -> Self {
        TraceRequest {
            path: args.trace,
            full_mode: args.full,
            strict: args.strict,
            root_name: args.root_name,
            evaluation_result: args.result,
        }
    }
}

impl Cli {
    pub async fn execute(self, engine: Engine) -> Result<()> {
        match self.command {
            Commands::Forwardtrace { args, width } => {
                for line in engine.forwardtrace(&TraceRequest::from(args), width).await? {
                    println!("{}", line);
                }
                Ok(())
            }
            Commands::Stats { args, json } => {
                println!("{}", engine.stats(&TraceRequest::from(args), json).await?);
                Ok(())
            }
            Commands::Dump { args } => {
                println!("{}", engine.dump(&TraceRequest::from(args)).await?);
                Ok(())
            }
            Commands::Init { path, force } => {
                engine.init(path, force).await?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_forwardtrace_alias() {
        let cli = Cli::try_parse_from([
            "metatrace", "ft", "trace.json", "--full", "-w", "25", "--root-name", "int_<fib<5>::value>",
        ])
        .unwrap();

        match cli.command {
            Commands::Forwardtrace { args, width } => {
                assert_eq!(args.trace, PathBuf::from("trace.json"));
                assert!(args.full);
                assert!(!args.strict);
                assert_eq!(width, Some(25));
                assert_eq!(args.root_name.as_deref(), Some("int_<fib<5>::value>"));
            }
            _ => panic!("expected forwardtrace"),
        }
    }

    #[test]
    fn test_trace_path_is_required() {
        assert!(Cli::try_parse_from(["metatrace", "stats"]).is_err());
    }
}
