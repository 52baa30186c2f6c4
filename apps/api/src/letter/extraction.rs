//! Extraction stage — turns raw candidate material into an ordered set of claims.

use crate::letter::claims::{find_blank_fields, Claim, ExtractedClaims};
use crate::letter::controller::RunStage;
use crate::letter::error::PipelineError;
use crate::letter::request::Locale;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::LanguageModel;

/// Builds the extraction instruction for `locale`.
pub fn build_extraction_prompt(raw_materials: &str, locale: Locale) -> String {
    fill_template(
        locale.templates().extraction_prompt,
        &[("raw_materials", raw_materials)],
    )
}

/// Asks the model for claims directly supported by `raw_materials`.
///
/// One structured call, no retries. The reply must decode into the claim
/// envelope exactly; anything else is `MalformedModelOutput`.
pub async fn extract_claims(
    model: &dyn LanguageModel,
    raw_materials: &str,
    locale: Locale,
) -> Result<Vec<Claim>, PipelineError> {
    let prompt = build_extraction_prompt(raw_materials, locale);
    let value = model
        .complete_json(&prompt, locale.templates().extraction_system)
        .await
        .map_err(|e| PipelineError::from_llm(RunStage::Extracting, e))?;

    decode_claims(value)
}

/// Validating decoder for the extraction schema.
pub(crate) fn decode_claims(value: serde_json::Value) -> Result<Vec<Claim>, PipelineError> {
    let extracted: ExtractedClaims = serde_json::from_value(value).map_err(|e| {
        PipelineError::malformed(RunStage::Extracting, format!("claim schema mismatch: {e}"))
    })?;

    let problems = find_blank_fields(&extracted.claims);
    if !problems.is_empty() {
        return Err(PipelineError::malformed(
            RunStage::Extracting,
            problems.join("; "),
        ));
    }

    Ok(extracted.claims)
}
