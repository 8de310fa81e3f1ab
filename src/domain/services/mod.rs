//! Domain Services
//!
//! Pure logic over domain entities. Only the theme-path check touches the
//! file system, and it does so through the `FileSystem` port.

mod differ;
pub mod parser;
pub mod validation;

pub use differ::{DiffLine, DiffResult, DiffTag, Differ};
pub use parser::{parse, parse_str, serialize, to_text};
pub use validation::{Check, CheckRegistry, Evaluation, Finding, FindingSink};
