//! HTTP handlers.

mod projects;
mod system;

#[cfg(test)]
mod projects_test;

pub use projects::*;
pub use system::*;
