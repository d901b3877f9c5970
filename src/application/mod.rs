//! Application layer: presentation of trees built by the domain layer

pub mod error;
pub mod layout;
pub mod render;

pub use error::{ApplicationError, ApplicationResult};
pub use layout::{LayeredGraph, LayoutNode, DEFAULT_PALETTE};
pub use render::{format_order, parse_color, render_layers, render_tree};
