//! Drafting stage — writes letter prose from the claim set and identity fields only.

use chrono::NaiveDate;

use crate::letter::claims::Claim;
use crate::letter::controller::RunStage;
use crate::letter::error::PipelineError;
use crate::letter::request::LetterRequest;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::LanguageModel;

/// Everything the drafting prompt is built from.
///
/// On a revision pass the controller passes the same request, claims and date;
/// `rejected_sentences` is only set when revision feedback is enabled.
#[derive(Debug, Clone, Copy)]
pub struct DraftInput<'a> {
    pub request: &'a LetterRequest,
    pub claims: &'a [Claim],
    pub letter_date: NaiveDate,
    pub rejected_sentences: Option<&'a [String]>,
}

/// Renders the claim list the way drafting and verification both show it.
pub fn render_claims(claims: &[Claim], claim_line: &str, no_claims: &str) -> String {
    if claims.is_empty() {
        return no_claims.to_string();
    }
    claims
        .iter()
        .map(|c| {
            fill_template(
                claim_line,
                &[
                    ("claim", c.claim.as_str()),
                    ("evidence", c.evidence.as_str()),
                    ("confidence", c.confidence.as_str()),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_drafting_prompt(input: &DraftInput<'_>) -> String {
    let locale = input.request.locale;
    let t = locale.templates();
    let claims = render_claims(input.claims, t.claim_line, t.no_claims);
    let letter_date = input.letter_date.format("%Y-%m-%d").to_string();

    let feedback = match input.rejected_sentences {
        Some(sentences) if !sentences.is_empty() => {
            let listed = sentences
                .iter()
                .map(|s| format!("- {s}"))
                .collect::<Vec<_>>()
                .join("\n");
            fill_template(t.revision_feedback, &[("sentences", listed.as_str())])
        }
        _ => String::new(),
    };

    fill_template(
        t.drafting_prompt,
        &[
            ("role", input.request.recommender_role.label(locale)),
            ("candidate_name", input.request.candidate_name.as_str()),
            ("target_program", input.request.target_program.as_str()),
            ("letter_date", letter_date.as_str()),
            ("claims", claims.as_str()),
            ("revision_feedback", feedback.as_str()),
        ],
    )
}

/// One free-text model call producing a complete letter.
///
/// An empty claim set is legal: the prompt says so explicitly and the model
/// writes a thin letter.
pub async fn draft_letter(
    model: &dyn LanguageModel,
    input: &DraftInput<'_>,
) -> Result<String, PipelineError> {
    let prompt = build_drafting_prompt(input);
    model
        .complete_text(&prompt, input.request.locale.templates().drafting_system)
        .await
        .map_err(|e| PipelineError::from_llm(RunStage::Drafting, e))
}
