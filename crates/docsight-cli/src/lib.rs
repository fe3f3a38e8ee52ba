//! Docsight pipeline: resolve → extract → summarize → persist.

pub mod menu;
pub mod output;
pub mod pipeline;

pub use pipeline::{truncate_chars, Pipeline, PipelineOutput};
