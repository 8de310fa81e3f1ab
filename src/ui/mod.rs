//! Terminal rendering for the grubwiz binary.
//!
//! Views return `String`s and take color/unicode support as arguments, so
//! they can be tested without a terminal.

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod prompt;
pub mod terminal;
pub mod theme;
pub mod views;
