//! Service implementations
//!
//! Real implementations of the record source trait. These are the only parts
//! of the planner that touch the outside world.

pub mod file_source;
pub mod inline_source;

#[cfg(test)]
mod tests;

pub use file_source::FileSource;
pub use inline_source::InlineSource;
