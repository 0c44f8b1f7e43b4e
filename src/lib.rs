//! # Tabulify SQL Library
//!
//! Heuristic database-script lexer and select-list column identifier
//! extractor.

pub mod app;
pub mod cli;
pub mod columns;
pub mod config;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod output;
