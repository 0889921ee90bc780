//! # cram-parser
//!
//! Parser and reference resolver for the cram format.
//!
//! The crate is organised as a staged compilation pipeline. Each stage is a
//! plain function over in-memory values, so the whole pipeline can be driven
//! with synthetic inputs from tests:
//!
//!     source text -> lexing -> token stream
//!                 -> parsing -> one document tree per file
//!                 -> symbol table (all files)
//!                 -> resolving -> resolved forest + cross-reference edges
//!
//! Lexing and parsing are per-file and independent; the symbol table and the
//! resolver are global barriers and run only once every file has parsed. The
//! single orchestration entry point for external drivers is
//! [`cram::compile::compile_sources`].

#![allow(rustdoc::invalid_html_tags)]

pub mod cram;
