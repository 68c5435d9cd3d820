//! Common utilities for the quill markup parser.
//!
//! This crate provides shared infrastructure used by the parser and serializer:
//! - **Warning System** - deduplicated, colored terminal output for recovered
//!   irregularities in input markup or node trees

pub mod warning;
