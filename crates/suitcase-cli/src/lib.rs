//! # suitcase-cli
//!
//! Command-line front end for `suitcase-core`: reads and writes nullable
//! integer preferences in file-backed namespaces, formats dates, and builds
//! query strings.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod cli;
pub mod commands;
pub mod logging;
