//! lexiquiz-core: quiz session engine, word repository, and scoring.
//!
//! This crate holds the vocabulary data model, the word-table parser, and the
//! session state machine that the presentation layers drive.

pub mod config;
pub mod distractor;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod repository;
pub mod score;
pub mod session;
