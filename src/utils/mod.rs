//! Small shared helpers.
//!
//! This module provides:
//! - Static regex compilation
//! - Terminal width detection

mod patterns;
mod terminal;

pub use patterns::compile_regex_unsafe;
pub use terminal::terminal_width;
