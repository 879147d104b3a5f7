//! Core utilities for polish
//!
//! This crate provides the pieces shared by the sniff engine, the contributed
//! sniffs and the `polish` binary:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Process execution**: shell command lines with captured output
//! - **Execution scope**: working directory and output mode restored on drop
//! - **Configuration**: TOML-based configuration discovery and parsing
//!
//! # Example
//!
//! ```rust,no_run
//! use polish_core::{process::local, scope::ExecutionScope};
//! use std::path::Path;
//!
//! let _scope = ExecutionScope::enter(Path::new("/srv/project")).expect("checks root");
//! let result = local("! git grep -P '^(<|=|>){7}(?![<=>])'").expect("spawn sh");
//! if result.failed() {
//!     eprintln!("{}", result.combined_output());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
#[allow(missing_docs)]
pub mod error;
pub mod process;
pub mod scope;

pub use error::{Error, ErrorCode, Result, ResultExt};
