//! CLI utilities for ambumap tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Station table rows with marker colors

#![warn(missing_docs)]

pub mod output;
