//! Route handlers

pub mod collections;
pub mod root;
