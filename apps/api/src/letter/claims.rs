//! Claim model — the normalized record of verifiable facts about a candidate.
//!
//! Claims are produced once per run by extraction and are read-only afterwards.
//! The wire shape is strict: unknown fields, missing fields, or a confidence
//! outside `high | medium | low` fail deserialization instead of being coerced.

use serde::{Deserialize, Serialize};

/// How strongly the source material supports a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// A single factual assertion with its supporting evidence.
///
/// Duplicates and overlapping claims are allowed and kept in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claim {
    pub claim: String,
    /// Quote or close paraphrase from the raw material.
    pub evidence: String,
    pub confidence: Confidence,
}

/// Structured-output envelope the extraction stage asks the model for.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractedClaims {
    pub claims: Vec<Claim>,
}

/// Returns one message per claim with blank text or blank evidence.
///
/// Empty strings are structurally valid JSON but carry nothing to ground a
/// letter on, so the extraction stage treats them as malformed output.
pub fn find_blank_fields(claims: &[Claim]) -> Vec<String> {
    let mut problems = Vec::new();
    for (i, claim) in claims.iter().enumerate() {
        if claim.claim.trim().is_empty() {
            problems.push(format!("claims[{i}].claim is blank"));
        }
        if claim.evidence.trim().is_empty() {
            problems.push(format!("claims[{i}].evidence is blank"));
        }
    }
    problems
}
