//! Main module for the cram compilation pipeline

pub mod ast;
pub mod compile;
pub mod lexing;
pub mod parsing;
pub mod resolving;
pub mod testing;
pub mod token;

pub use compile::{
    compile_sources, compile_sources_with, CompileOptions, CompileOutput, ResolvedForest,
    SourceFile,
};
