//! # DEADFILES
//!
//! Finds the files a project actually uses.
//!
//! Starting from a set of entry files or directories, DEADFILES follows quoted
//! path literals found in file contents (`"./util.js"`, `'img/logo.png'`,
//! `import x from "../lib/helper"`) and builds the transitive closure of files
//! that are reachable. Everything else under the project root is reported as
//! unused, with unused directories collapsed to their outermost ancestor.
//!
//! ## Output Formats
//!
//! - **Text**: size-sorted listings of unused files and directories
//! - **JSON**: used/unused file lists, reference edges and diagnostics
//!
//! Resolution never fails. Missing entries, dangling references and unreadable
//! files are reported through a [`DiagnosticSink`](crate::core::DiagnosticSink).

pub mod core;
pub mod formatters;
pub mod parsers;
