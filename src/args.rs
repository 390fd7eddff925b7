use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Qualified names of Java declarations.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(propagate_version = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the qualified name of every declaration.
    #[command(visible_alias = "n")]
    Names(Sources),

    /// Print where a qualified name is declared.
    #[command(visible_alias = "f")]
    Find {
        /// The qualified name to look for, e.g. `foo.Bar$1#run()`.
        name: String,

        #[command(flatten)]
        sources: Sources,
    },

    /// Check whether qualified names are well-formed.
    #[command(visible_alias = "c")]
    Check {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print a Graphviz graph of how the declarations of a file nest.
    Dot {
        #[arg(required = true)]
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct Sources {
    /// Java source files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}
