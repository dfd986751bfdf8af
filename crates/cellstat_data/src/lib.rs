//! Plain data types shared by the cellstat crates.
//!
//! Run files are trees of named groups and typed datasets. This crate holds
//! that tree and the key names the analysis tools look up inside it; it has no
//! knowledge of how a tree is stored on disk.

pub mod data;

pub use data::hierarchy::{Dataset, Group, Node, Values};
pub use data::layout;
