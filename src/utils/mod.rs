//! Utility helpers

pub mod fs;
