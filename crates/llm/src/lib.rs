//! LLM client for legal case analysis and question answering

mod advisor;
mod ai_types;
mod client;
pub mod error;


pub use advisor::LegalAdvisor;
pub use client::LlmClient;
pub use error::LlmError;
