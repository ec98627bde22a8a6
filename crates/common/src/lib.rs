//! Shared plumbing for the MovieFinder crates.

pub mod environment;
mod environment_variables;
