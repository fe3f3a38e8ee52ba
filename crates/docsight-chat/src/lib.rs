//! Chat-completion access and document insight generation.
//!
//! The model is asked for a `SUMMARY:` and a `KEY POINTS:` section; its free
//! text reply is parsed back into [`docsight_core::Insights`].

pub mod config;
pub mod insights;
pub mod providers;
pub mod types;

pub use config::ChatConfig;
pub use insights::{generate_insights, parse_model_output, InsightGenerator, NO_TEXT_SUMMARY};
pub use providers::{ChatClient, ChatModel};
pub use types::*;
