//! Scigap Remote - Clients for external collaborators
//!
//! Two remote capabilities the pipeline consumes:
//! - A language model that writes research-gap prose from extracted
//!   sections (OpenAI-compatible or Ollama)
//! - A PDF-to-text conversion service that returns per-page column
//!   regions for the two-column heuristic
//!
//! Neither client retries: any non-success response is an immediate
//! hard failure of the request that triggered it.

pub mod convert;
pub mod llm;

pub use convert::ConversionClient;
pub use llm::{build_gap_prompt, create_gap_client, GapModel, OllamaGapClient, OpenAiGapClient};
