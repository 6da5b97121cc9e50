//! Duplicate Detector Library
//!
//! A library for locating redundant copies of the same movie inside and
//! across media library directory trees, and ranking candidates by quality.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
