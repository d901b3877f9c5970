//! Ordered multi-way trees of labeled nodes with blind search.
//!
//! Layers, leaves first:
//! - [`domain`]: arena-backed [`domain::Tree`], BFS/DFS traversal, membership,
//!   content search, ancestor distance and construction from a description
//! - [`application`]: layered layout and text rendering of a tree
//! - [`config`]: layered settings (defaults, config files, env vars)
//! - [`cli`]: clap arguments, command dispatch and the interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{Node, NodeId, SearchMethod, Tree, TreeError, TreeResult};
