//! Utility functions

pub mod hash;
pub mod sql;
