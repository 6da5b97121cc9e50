//! Core duplicate detection and ranking logic.

pub mod engine;
pub mod grouper;
pub mod matcher;
pub mod quality;
pub mod scanner;
pub mod selector;
pub mod title;
