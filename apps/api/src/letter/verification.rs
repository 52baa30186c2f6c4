//! Verification stage — audits a draft against the claim set.

use serde::{Deserialize, Serialize};

use crate::letter::claims::Claim;
use crate::letter::controller::RunStage;
use crate::letter::drafting::render_claims;
use crate::letter::error::PipelineError;
use crate::letter::request::Locale;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::LanguageModel;

/// How much of a draft the auditor judged unsupported by the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HallucinationRisk {
    /// Every sentence is supported.
    Low,
    Medium,
    High,
}

impl HallucinationRisk {
    pub fn needs_revision(&self) -> bool {
        !matches!(self, HallucinationRisk::Low)
    }
}

/// Structured verdict for one draft.
///
/// `risk` and `unsupported_sentences` come from the model independently; an
/// empty list alongside `medium`/`high` is kept as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationReport {
    #[serde(rename = "hallucination_risk")]
    pub risk: HallucinationRisk,
    pub unsupported_sentences: Vec<String>,
}

pub fn build_verification_prompt(claims: &[Claim], letter: &str, locale: Locale) -> String {
    let t = locale.templates();
    let claims = render_claims(claims, t.claim_line, t.no_claims);
    fill_template(
        t.verification_prompt,
        &[("claims", claims.as_str()), ("letter", letter)],
    )
}

/// One structured call judging `letter` against `claims`.
pub async fn verify_letter(
    model: &dyn LanguageModel,
    claims: &[Claim],
    letter: &str,
    locale: Locale,
) -> Result<VerificationReport, PipelineError> {
    let prompt = build_verification_prompt(claims, letter, locale);
    let value = model
        .complete_json(&prompt, locale.templates().verification_system)
        .await
        .map_err(|e| PipelineError::from_llm(RunStage::Verifying, e))?;

    serde_json::from_value(value).map_err(|e| {
        PipelineError::malformed(
            RunStage::Verifying,
            format!("verification schema mismatch: {e}"),
        )
    })
}
