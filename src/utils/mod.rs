//! # Utilities Module
//!
//! Analysis helpers that run over finished grids.

pub mod connectivity;

pub use connectivity::*;
