//! Revision controller — drives extract → draft → verify → (redraft | stop).
//!
//! # State machine
//! ```text
//! Extracting ──Advance──► Drafting ──Advance──► Verifying ──Accept──► Final
//!                            ▲                      │
//!                            │                      ├──Revise──► Revising ──Advance──┐
//!                            │                      │                                │
//!                            └──────────────────────┼────────────────────────────────┘
//!                                                   └──GiveUp──► RevisionLimitReached
//! ```
//! Transitions are data (`TRANSITIONS`), and the only decision point is
//! `decide`, so both can be tested without a model. Each run owns its
//! `RunState`; nothing is shared between runs.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::letter::claims::Claim;
use crate::letter::drafting::{draft_letter, DraftInput};
use crate::letter::error::PipelineError;
use crate::letter::extraction::extract_claims;
use crate::letter::request::LetterRequest;
use crate::letter::verification::{verify_letter, HallucinationRisk, VerificationReport};
use crate::llm_client::LanguageModel;

/// Default upper bound on drafting invocations per run.
pub const DEFAULT_MAX_DRAFTS: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// States and transitions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Extracting,
    Drafting,
    Verifying,
    Revising,
    Final,
    RevisionLimitReached,
}

impl RunStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStage::Final | RunStage::RevisionLimitReached)
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Extracting => "extracting",
            RunStage::Drafting => "drafting",
            RunStage::Verifying => "verifying",
            RunStage::Revising => "revising",
            RunStage::Final => "final",
            RunStage::RevisionLimitReached => "revision_limit_reached",
        };
        f.write_str(name)
    }
}

/// Edge labels of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The stage finished its work; move on unconditionally.
    Advance,
    /// Verification found the draft supported.
    Accept,
    /// Verification found unsupported content and drafts remain.
    Revise,
    /// Verification found unsupported content and the draft budget is spent.
    GiveUp,
}

/// The complete transition table. Anything not listed is a bug.
pub const TRANSITIONS: &[(RunStage, Transition, RunStage)] = &[
    (RunStage::Extracting, Transition::Advance, RunStage::Drafting),
    (RunStage::Drafting, Transition::Advance, RunStage::Verifying),
    (RunStage::Verifying, Transition::Accept, RunStage::Final),
    (RunStage::Verifying, Transition::Revise, RunStage::Revising),
    (RunStage::Verifying, Transition::GiveUp, RunStage::RevisionLimitReached),
    (RunStage::Revising, Transition::Advance, RunStage::Drafting),
];

pub fn next_stage(from: RunStage, via: Transition) -> Option<RunStage> {
    TRANSITIONS
        .iter()
        .find(|(f, v, _)| *f == from && *v == via)
        .map(|(_, _, to)| *to)
}

// ────────────────────────────────────────────────────────────────────────────
// Revision policy
// ────────────────────────────────────────────────────────────────────────────

/// Whether a redraft sees what the previous audit rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevisionFeedback {
    /// Redraft from the same prompt as the first draft.
    #[default]
    None,
    /// Append the previous pass's unsupported sentences to the redraft prompt.
    UnsupportedSentences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionPolicy {
    /// Maximum drafting invocations per run. Always at least 1.
    max_drafts: u32,
    pub feedback: RevisionFeedback,
}

impl RevisionPolicy {
    /// `max_drafts` of 0 is raised to 1: a run always produces one draft.
    pub fn new(max_drafts: u32, feedback: RevisionFeedback) -> Self {
        Self {
            max_drafts: max_drafts.max(1),
            feedback,
        }
    }

    pub fn max_drafts(&self) -> u32 {
        self.max_drafts
    }
}

impl Default for RevisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DRAFTS, RevisionFeedback::None)
    }
}

/// The decision after a verification pass.
pub fn decide(risk: HallucinationRisk, drafts_written: u32, policy: &RevisionPolicy) -> Transition {
    if !risk.needs_revision() {
        Transition::Accept
    } else if drafts_written >= policy.max_drafts {
        Transition::GiveUp
    } else {
        Transition::Revise
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Run state and result
// ────────────────────────────────────────────────────────────────────────────

/// The mutable record threaded through one run.
///
/// `claims` is written once by extraction. `draft_letter` is written by
/// drafting before verification reads it. The verification fields are
/// written by verification and read only by `decide`.
#[derive(Debug, Clone)]
pub struct RunState {
    pub run_id: Uuid,
    pub request: LetterRequest,
    pub letter_date: NaiveDate,
    pub claims: Vec<Claim>,
    pub draft_letter: Option<String>,
    pub hallucination_risk: Option<HallucinationRisk>,
    pub unsupported_sentences: Option<Vec<String>>,
    pub drafts_written: u32,
    pub passes: Vec<PassRecord>,
}

impl RunState {
    pub fn new(request: LetterRequest, letter_date: NaiveDate) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            request,
            letter_date,
            claims: Vec::new(),
            draft_letter: None,
            hallucination_risk: None,
            unsupported_sentences: None,
            drafts_written: 0,
            passes: Vec::new(),
        }
    }

    fn record_verification(&mut self, letter: &str, report: VerificationReport) {
        self.passes.push(PassRecord {
            pass: self.drafts_written,
            draft_letter: letter.to_string(),
            hallucination_risk: report.risk,
            unsupported_sentences: report.unsupported_sentences.clone(),
        });
        self.hallucination_risk = Some(report.risk);
        self.unsupported_sentences = Some(report.unsupported_sentences);
    }

    /// The draft verification should audit. Drafting always runs first.
    fn current_draft(&self) -> Result<String, PipelineError> {
        self.draft_letter
            .clone()
            .ok_or(PipelineError::MissingStageOutput {
                stage: RunStage::Verifying,
                missing: "a draft letter",
            })
    }

    fn into_result(self, stage: RunStage, outcome: RunOutcome) -> Result<RunResult, PipelineError> {
        let Some(letter) = self.draft_letter else {
            return Err(PipelineError::MissingStageOutput {
                stage,
                missing: "a draft letter",
            });
        };
        let Some(risk) = self.hallucination_risk else {
            return Err(PipelineError::MissingStageOutput {
                stage,
                missing: "a verification report",
            });
        };
        Ok(RunResult {
            run_id: self.run_id,
            outcome,
            letter,
            hallucination_risk: risk,
            unsupported_sentences: self.unsupported_sentences.unwrap_or_default(),
            claims: self.claims,
            drafts_written: self.drafts_written,
            passes: self.passes,
        })
    }
}

/// One Drafting → Verification pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    /// 1-based drafting invocation number.
    pub pass: u32,
    pub draft_letter: String,
    pub hallucination_risk: HallucinationRisk,
    pub unsupported_sentences: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The last draft passed verification with low risk.
    Final,
    /// The draft budget ran out; `letter` is the last draft and still carries
    /// its unresolved risk.
    RevisionLimitReached,
}

/// What a run hands back to its caller. Owned by the caller; nothing is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub outcome: RunOutcome,
    pub letter: String,
    pub hallucination_risk: HallucinationRisk,
    pub unsupported_sentences: Vec<String>,
    pub claims: Vec<Claim>,
    pub drafts_written: u32,
    pub passes: Vec<PassRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Driver
// ────────────────────────────────────────────────────────────────────────────

/// Runs one letter generation to a terminal state.
///
/// Stages run strictly in sequence; each awaits exactly one model call. Any
/// stage error aborts the run and is returned unchanged. Dropping the future
/// between stages abandons the run with nothing to clean up.
pub async fn run_letter_pipeline(
    model: &dyn LanguageModel,
    request: LetterRequest,
    policy: &RevisionPolicy,
    letter_date: NaiveDate,
) -> Result<RunResult, PipelineError> {
    let mut run = RunState::new(request, letter_date);
    let mut stage = RunStage::Extracting;
    let locale = run.request.locale;

    info!(
        run_id = %run.run_id,
        locale = ?locale,
        max_drafts = policy.max_drafts(),
        "Starting letter run"
    );

    while !stage.is_terminal() {
        let via = match stage {
            RunStage::Extracting => {
                run.claims = extract_claims(model, &run.request.raw_materials, locale).await?;
                debug!(run_id = %run.run_id, claims = run.claims.len(), "Claims extracted");
                Transition::Advance
            }

            RunStage::Drafting => {
                let rejected = match policy.feedback {
                    RevisionFeedback::UnsupportedSentences => run.unsupported_sentences.as_deref(),
                    RevisionFeedback::None => None,
                };
                let input = DraftInput {
                    request: &run.request,
                    claims: &run.claims,
                    letter_date: run.letter_date,
                    rejected_sentences: rejected,
                };
                let letter = draft_letter(model, &input).await?;
                run.drafts_written += 1;
                debug!(run_id = %run.run_id, pass = run.drafts_written, "Draft written");
                run.draft_letter = Some(letter);
                Transition::Advance
            }

            RunStage::Verifying => {
                let letter = run.current_draft()?;
                let report = verify_letter(model, &run.claims, &letter, locale).await?;
                debug!(
                    run_id = %run.run_id,
                    pass = run.drafts_written,
                    risk = ?report.risk,
                    unsupported = report.unsupported_sentences.len(),
                    "Draft verified"
                );
                let via = decide(report.risk, run.drafts_written, policy);
                run.record_verification(&letter, report);
                via
            }

            RunStage::Revising => Transition::Advance,

            RunStage::Final | RunStage::RevisionLimitReached => break,
        };

        let from = stage;
        stage = next_stage(from, via).ok_or(PipelineError::InvalidTransition { from, via })?;
        debug!(run_id = %run.run_id, %from, to = %stage, "Stage transition");
    }

    if stage == RunStage::Final {
        info!(run_id = %run.run_id, drafts = run.drafts_written, "Letter run finished");
        run.into_result(stage, RunOutcome::Final)
    } else {
        warn!(
            run_id = %run.run_id,
            drafts = run.drafts_written,
            risk = ?run.hallucination_risk,
            "Letter run stopped at revision limit with unresolved risk"
        );
        run.into_result(stage, RunOutcome::RevisionLimitReached)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::letter::drafting::build_drafting_prompt;
    use crate::letter::extraction::build_extraction_prompt;
    use crate::letter::prompts::{ENGLISH, TRADITIONAL_CHINESE};
    use crate::letter::request::{Locale, RecommenderRole};
    use crate::letter::test_support::{verdict, CallMode, ScriptedModel};
    use crate::llm_client::LlmError;

    fn request(locale: Locale) -> LetterRequest {
        LetterRequest {
            candidate_name: "Jonas Berg".to_string(),
            recommender_role: RecommenderRole::Supervisor,
            target_program: "MSc in Data Science".to_string(),
            raw_materials: "Interned on the forecasting team for 6 months.".to_string(),
            locale,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn one_claim() -> serde_json::Value {
        json!({
            "claims": [{
                "claim": "Six-month internship on the forecasting team",
                "evidence": "Interned on the forecasting team for 6 months.",
                "confidence": "high"
            }]
        })
    }

    // ── Transition table ────────────────────────────────────────────────────

    #[test]
    fn test_table_happy_path() {
        assert_eq!(
            next_stage(RunStage::Extracting, Transition::Advance),
            Some(RunStage::Drafting)
        );
        assert_eq!(
            next_stage(RunStage::Drafting, Transition::Advance),
            Some(RunStage::Verifying)
        );
        assert_eq!(
            next_stage(RunStage::Verifying, Transition::Accept),
            Some(RunStage::Final)
        );
    }

    #[test]
    fn test_table_revision_edge_returns_to_drafting() {
        assert_eq!(
            next_stage(RunStage::Verifying, Transition::Revise),
            Some(RunStage::Revising)
        );
        assert_eq!(
            next_stage(RunStage::Revising, Transition::Advance),
            Some(RunStage::Drafting)
        );
        assert_eq!(
            next_stage(RunStage::Verifying, Transition::GiveUp),
            Some(RunStage::RevisionLimitReached)
        );
    }

    #[test]
    fn test_table_has_no_edge_back_to_extracting() {
        assert!(TRANSITIONS.iter().all(|(_, _, to)| *to != RunStage::Extracting));
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_edges() {
        for (from, _, _) in TRANSITIONS {
            assert!(!from.is_terminal(), "terminal stage {from} has an outgoing edge");
        }
        assert!(RunStage::Final.is_terminal());
        assert!(RunStage::RevisionLimitReached.is_terminal());
    }

    #[test]
    fn test_table_rejects_undeclared_edges() {
        assert_eq!(next_stage(RunStage::Extracting, Transition::Accept), None);
        assert_eq!(next_stage(RunStage::Drafting, Transition::Revise), None);
        assert_eq!(next_stage(RunStage::Final, Transition::Advance), None);
    }

    // ── Decision function ───────────────────────────────────────────────────

    #[test]
    fn test_decide_low_accepts_even_at_limit() {
        let policy = RevisionPolicy::new(2, RevisionFeedback::None);
        assert_eq!(decide(HallucinationRisk::Low, 1, &policy), Transition::Accept);
        assert_eq!(decide(HallucinationRisk::Low, 2, &policy), Transition::Accept);
    }

    #[test]
    fn test_decide_medium_high_revise_until_limit() {
        let policy = RevisionPolicy::new(3, RevisionFeedback::None);
        assert_eq!(decide(HallucinationRisk::Medium, 1, &policy), Transition::Revise);
        assert_eq!(decide(HallucinationRisk::High, 2, &policy), Transition::Revise);
        assert_eq!(decide(HallucinationRisk::High, 3, &policy), Transition::GiveUp);
    }

    #[test]
    fn test_policy_floor_is_one_draft() {
        let policy = RevisionPolicy::new(0, RevisionFeedback::None);
        assert_eq!(policy.max_drafts(), 1);
        assert_eq!(decide(HallucinationRisk::High, 1, &policy), Transition::GiveUp);
    }

    #[test]
    fn test_default_policy() {
        let policy = RevisionPolicy::default();
        assert_eq!(policy.max_drafts(), DEFAULT_MAX_DRAFTS);
        assert_eq!(policy.feedback, RevisionFeedback::None);
    }

    // ── Full runs against a scripted model ──────────────────────────────────

    #[tokio::test]
    async fn test_low_risk_first_pass_is_one_call_per_stage() {
        let model = ScriptedModel::new()
            .with_json(one_claim())
            .with_text("First draft.")
            .with_json(verdict("low", &[]));

        let result = run_letter_pipeline(
            &model,
            request(Locale::English),
            &RevisionPolicy::default(),
            date(),
        )
        .await
        .unwrap();

        assert_eq!(result.outcome, RunOutcome::Final);
        assert_eq!(result.letter, "First draft.");
        assert_eq!(result.hallucination_risk, HallucinationRisk::Low);
        assert_eq!(result.drafts_written, 1);
        assert_eq!(result.passes.len(), 1);
        assert_eq!(result.claims.len(), 1);

        let modes: Vec<CallMode> = model.calls().iter().map(|c| c.mode).collect();
        assert_eq!(modes, vec![CallMode::Json, CallMode::Text, CallMode::Json]);
    }

    #[tokio::test]
    async fn test_medium_then_low_redrafts_with_same_inputs() {
        let model = ScriptedModel::new()
            .with_json(one_claim())
            .with_text("Draft one.")
            .with_json(verdict("medium", &["He is a genius."]))
            .with_text("Draft two.")
            .with_json(verdict("low", &[]));

        let result = run_letter_pipeline(
            &model,
            request(Locale::English),
            &RevisionPolicy::default(),
            date(),
        )
        .await
        .unwrap();

        assert_eq!(result.outcome, RunOutcome::Final);
        assert_eq!(result.letter, "Draft two.");
        assert_eq!(result.drafts_written, 2);
        assert!(result.unsupported_sentences.is_empty());
        assert_eq!(result.passes[0].hallucination_risk, HallucinationRisk::Medium);
        assert_eq!(result.passes[0].draft_letter, "Draft one.");
        assert_eq!(result.passes[1].pass, 2);

        let calls = model.calls();
        let extractions = calls
            .iter()
            .filter(|c| c.system == ENGLISH.extraction_system)
            .count();
        assert_eq!(extractions, 1, "claims must not be re-extracted");

        let drafts: Vec<_> = calls.iter().filter(|c| c.mode == CallMode::Text).collect();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].prompt, drafts[1].prompt);
    }

    #[tokio::test]
    async fn test_always_high_stops_after_exactly_max_drafts() {
        for max_drafts in [1, 2, 5] {
            let model = ScriptedModel::new()
                .with_json(one_claim())
                .with_json_fallback(verdict("high", &["Unsupported praise."]));

            let result = run_letter_pipeline(
                &model,
                request(Locale::English),
                &RevisionPolicy::new(max_drafts, RevisionFeedback::None),
                date(),
            )
            .await
            .unwrap();

            assert_eq!(result.outcome, RunOutcome::RevisionLimitReached);
            assert_eq!(result.drafts_written, max_drafts);
            assert_eq!(result.hallucination_risk, HallucinationRisk::High);
            assert_eq!(result.unsupported_sentences, vec!["Unsupported praise.".to_string()]);
            assert_eq!(result.letter, format!("Draft #{max_drafts}"));

            let text_calls = model
                .calls()
                .iter()
                .filter(|c| c.mode == CallMode::Text)
                .count();
            assert_eq!(text_calls as u32, max_drafts);
        }
    }

    #[tokio::test]
    async fn test_feedback_policy_feeds_previous_rejections_into_redraft() {
        let model = ScriptedModel::new()
            .with_json(one_claim())
            .with_text("Draft one.")
            .with_json(verdict("high", &["He led the whole company."]))
            .with_text("Draft two.")
            .with_json(verdict("low", &[]));

        let policy = RevisionPolicy::new(3, RevisionFeedback::UnsupportedSentences);
        run_letter_pipeline(&model, request(Locale::English), &policy, date())
            .await
            .unwrap();

        let drafts: Vec<_> = model
            .calls()
            .into_iter()
            .filter(|c| c.mode == CallMode::Text)
            .collect();
        assert!(!drafts[0].prompt.contains("A previous draft was rejected"));
        assert!(drafts[1].prompt.contains("- He led the whole company."));

        // Apart from the feedback section the redraft prompt is unchanged.
        let req = request(Locale::English);
        let claims = crate::letter::extraction::decode_claims(one_claim()).unwrap();
        let first = build_drafting_prompt(&DraftInput {
            request: &req,
            claims: &claims,
            letter_date: date(),
            rejected_sentences: None,
        });
        assert_eq!(drafts[0].prompt, first);
    }

    #[tokio::test]
    async fn test_empty_claims_still_draft_and_verify() {
        let model = ScriptedModel::new()
            .with_json(json!({"claims": []}))
            .with_text("Dear Committee, I recommend Jonas.")
            .with_json(verdict("high", &["I recommend Jonas."]));

        let result = run_letter_pipeline(
            &model,
            request(Locale::English),
            &RevisionPolicy::new(1, RevisionFeedback::None),
            date(),
        )
        .await
        .unwrap();

        assert!(result.claims.is_empty());
        assert_eq!(result.outcome, RunOutcome::RevisionLimitReached);

        let calls = model.calls();
        assert!(calls[1].prompt.contains(ENGLISH.no_claims));
        assert!(calls[2].prompt.contains(ENGLISH.no_claims));
    }

    #[tokio::test]
    async fn test_chinese_locale_sends_only_chinese_templates() {
        let model = ScriptedModel::new()
            .with_json(one_claim())
            .with_text("推薦信")
            .with_json(verdict("low", &[]));

        let req = request(Locale::TraditionalChinese);
        run_letter_pipeline(&model, req.clone(), &RevisionPolicy::default(), date())
            .await
            .unwrap();

        let calls = model.calls();
        assert_eq!(calls[0].system, TRADITIONAL_CHINESE.extraction_system);
        assert_eq!(
            calls[0].prompt,
            build_extraction_prompt(&req.raw_materials, Locale::TraditionalChinese)
        );
        assert_eq!(calls[1].system, TRADITIONAL_CHINESE.drafting_system);
        assert!(calls[1].prompt.starts_with("你是一位主管"));
        assert_eq!(calls[2].system, TRADITIONAL_CHINESE.verification_system);
        for call in &calls {
            assert!(!call.prompt.contains("IMPORTANT RULES"));
            assert!(!call.prompt.contains("Verified facts"));
            assert!(!call.prompt.contains("Raw materials:"));
        }
    }

    #[tokio::test]
    async fn test_malformed_extraction_aborts_before_drafting() {
        let model = ScriptedModel::new().with_json(json!({
            "claims": [{"claim": "x", "evidence": "y", "confidence": "absolute"}]
        }));

        let err = run_letter_pipeline(
            &model,
            request(Locale::English),
            &RevisionPolicy::default(),
            date(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MalformedModelOutput {
                stage: RunStage::Extracting,
                ..
            }
        ));
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_during_revision_aborts_run() {
        let model = ScriptedModel::new()
            .with_json(one_claim())
            .with_text("Draft one.")
            .with_json(verdict("medium", &[]))
            .with_text_error(LlmError::RateLimited { retries: 3 });

        let err = run_letter_pipeline(
            &model,
            request(Locale::English),
            &RevisionPolicy::default(),
            date(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::UpstreamCallFailure {
                stage: RunStage::Drafting,
                ..
            }
        ));
        assert_eq!(model.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_runs_are_independent() {
        let model = ScriptedModel::new()
            .with_json(one_claim())
            .with_text("A.")
            .with_json(verdict("low", &[]))
            .with_json(one_claim())
            .with_text("B.")
            .with_json(verdict("low", &[]));

        let policy = RevisionPolicy::default();
        let first = run_letter_pipeline(&model, request(Locale::English), &policy, date())
            .await
            .unwrap();
        let second = run_letter_pipeline(&model, request(Locale::English), &policy, date())
            .await
            .unwrap();

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(second.drafts_written, 1);
        assert_eq!(second.passes.len(), 1);
        assert_eq!(second.letter, "B.");
    }

    #[test]
    fn test_run_result_serializes_outcome_snake_case() {
        let result = RunResult {
            run_id: Uuid::nil(),
            outcome: RunOutcome::RevisionLimitReached,
            letter: "Dear Committee".to_string(),
            hallucination_risk: HallucinationRisk::High,
            unsupported_sentences: vec![],
            claims: vec![],
            drafts_written: 3,
            passes: vec![],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["outcome"], "revision_limit_reached");
        assert_eq!(value["hallucination_risk"], "high");
    }

    #[test]
    fn test_verifying_without_a_draft_is_an_error() {
        let run = RunState::new(request(Locale::English), date());
        let err = run.current_draft().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingStageOutput {
                stage: RunStage::Verifying,
                ..
            }
        ));
    }

    #[test]
    fn test_into_result_reports_the_stage_it_was_called_from() {
        let mut run = RunState::new(request(Locale::English), date());
        run.draft_letter = Some("Dear Committee".to_string());
        let err = run
            .into_result(RunStage::RevisionLimitReached, RunOutcome::RevisionLimitReached)
            .unwrap_err();
        match err {
            PipelineError::MissingStageOutput { stage, missing } => {
                assert_eq!(stage, RunStage::RevisionLimitReached);
                assert_eq!(missing, "a verification report");
            }
            other => panic!("expected MissingStageOutput, got {other:?}"),
        }
    }
}
