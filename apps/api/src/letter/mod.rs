// Recommendation letter pipeline.
// Extraction → Drafting → Verification, with a bounded revision loop in controller.
// All model calls go through the llm_client::LanguageModel trait.

pub mod claims;
pub mod controller;
pub mod drafting;
pub mod error;
pub mod export;
pub mod extraction;
pub mod handlers;
pub mod materials;
pub mod prompts;
pub mod request;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;
