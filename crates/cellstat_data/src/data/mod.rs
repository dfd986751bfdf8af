//! Core data structures for run documents.

pub mod hierarchy;
pub mod layout;
