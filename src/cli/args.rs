//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand, ValueHint};

use crate::domain::SearchMethod;

/// Blind BFS/DFS search over an ordered, labeled tree
#[derive(Parser, Debug)]
#[command(name = "blindtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file describing the tree (TOML)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Traversal method (default: from config, else bfs)
    #[arg(
        short,
        long,
        global = true,
        ignore_case = true,
        value_parser = method_parser()
    )]
    pub method: Option<SearchMethod>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// `bfs` or `dfs`, in any case.
fn method_parser() -> impl TypedValueParser<Value = SearchMethod> {
    PossibleValuesParser::new(["bfs", "dfs"]).try_map(|s| s.parse::<SearchMethod>())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Print every node in traversal order
    Order,

    /// Find the first node with this label
    Search {
        /// Node label
        label: String,
    },

    /// Edges from an ancestor down to a descendant
    Distance {
        /// Ancestor label
        from: String,
        /// Descendant label
        to: String,
    },

    /// Height of the subtree below a node (default: root)
    Depth {
        /// Node label
        label: Option<String>,
    },

    /// Draw the tree, colored by layer
    Show,

    /// List node labels per layer
    Layers,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
}
