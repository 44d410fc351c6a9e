mod error;
mod nav_stack;

pub use crate::error::{Error, Result};
pub use crate::nav_stack::{NavStack, DEFAULT_CAPACITY};
