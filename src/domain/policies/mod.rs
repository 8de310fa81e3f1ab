//! Domain Policies
//!
//! Static knowledge about GRUB that other parts of the domain consult.

pub mod param_catalog;

pub use param_catalog::{InputRule, ParamSpec};
