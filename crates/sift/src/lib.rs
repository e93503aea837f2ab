//! sift: a query language front end for search applications.
//!
//! sift turns a typed query such as `Lukas AND (me OR him) AND -term AND trip:123`
//! into an expression tree. This crate hosts the `sift` command-line harness,
//! which wires configuration, scanning, parsing and printing together.

#![warn(missing_docs)]

pub mod cli;
