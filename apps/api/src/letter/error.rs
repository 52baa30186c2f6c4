//! Error types for the letter pipeline.

use thiserror::Error;

use crate::letter::controller::{RunStage, Transition};
use crate::llm_client::LlmError;

/// Any of these aborts the run. The pipeline never retries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// The model answered, but not in the shape the stage requires.
    #[error("{stage} stage received malformed model output: {detail}")]
    MalformedModelOutput { stage: RunStage, detail: String },

    /// The call to the model service itself failed (network, auth, rate limit).
    #[error("{stage} stage model call failed: {source}")]
    UpstreamCallFailure {
        stage: RunStage,
        #[source]
        source: LlmError,
    },

    #[error("no transition from {from} via {via:?}")]
    InvalidTransition { from: RunStage, via: Transition },

    /// A stage was reached before the stage that feeds it had run.
    #[error("{stage} stage reached without {missing}")]
    MissingStageOutput {
        stage: RunStage,
        missing: &'static str,
    },
}

impl PipelineError {
    /// Classifies a transport error raised while `stage` was waiting on the model.
    pub fn from_llm(stage: RunStage, err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => PipelineError::MalformedModelOutput {
                stage,
                detail: format!("response is not valid JSON: {e}"),
            },
            LlmError::EmptyContent => PipelineError::MalformedModelOutput {
                stage,
                detail: "response was empty".to_string(),
            },
            source => PipelineError::UpstreamCallFailure { stage, source },
        }
    }

    pub fn malformed(stage: RunStage, detail: impl Into<String>) -> Self {
        PipelineError::MalformedModelOutput {
            stage,
            detail: detail.into(),
        }
    }
}
