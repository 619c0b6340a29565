#![forbid(unsafe_code)]

mod tree;
mod types;

#[cfg(test)]
mod tests;

pub use tree::*;
pub use types::*;
