//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, so every
//! user-supplied path goes through [`paths`] before it is opened.

pub mod paths;

pub use paths::{data_dir, expand_tilde, trace_file};
