//! # Spanfold
//!
//! Converts between character-offset annotations and labeled substring
//! sequences for sequence-labeling pipelines. See [`spanfold_core`] for the
//! full API.

pub use spanfold_core::*;
