//! Axum route handlers for the Letter API.
//!
//! Handlers own input validation and credential selection; the pipeline
//! itself only ever sees a complete `LetterRequest`.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::{de::DeserializeOwned, Deserialize};

use crate::errors::AppError;
use crate::letter::controller::{run_letter_pipeline, RunResult};
use crate::letter::export::{export_filename, render_txt, TXT_CONTENT_TYPE};
use crate::letter::materials::extract_pdf_text;
use crate::letter::request::{compose_materials, LetterRequest, Locale, RecommenderRole};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateLetterRequest {
    #[serde(flatten)]
    pub letter: LetterRequest,
    /// Overrides the configured key for this request only.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportTxtRequest {
    pub letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/letters
///
/// Runs the full pipeline on JSON input and returns the run result, including
/// the per-pass trace.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateLetterRequest>,
) -> Result<Json<RunResult>, AppError> {
    let result = run_validated(&state, request.letter, request.api_key).await?;
    Ok(Json(result))
}

/// POST /api/v1/letters/upload
///
/// Multipart form: `candidate_name`, `recommender_role`, `target_program`,
/// optional `locale`, `raw_materials`, `api_key`, and an optional PDF `file`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RunResult>, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.map_err(invalid_multipart)?;
                if !bytes.is_empty() {
                    form.document_text = Some(extract_pdf_text(bytes).await?);
                }
            }
            "candidate_name" | "recommender_role" | "target_program" | "locale"
            | "raw_materials" | "api_key" => {
                let value = field.text().await.map_err(invalid_multipart)?;
                form.set(&name, value);
            }
            _ => {}
        }
    }

    let (letter, api_key) = form.into_request()?;
    let result = run_validated(&state, letter, api_key).await?;
    Ok(Json(result))
}

/// POST /api/v1/letters/export/txt
///
/// Returns the letter as a downloadable UTF-8 text file.
pub async fn handle_export_txt(
    Json(request): Json<ExportTxtRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.letter.trim().is_empty() {
        return Err(AppError::Validation("letter cannot be empty".to_string()));
    }

    let filename = export_filename(Local::now().naive_local());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, TXT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        render_txt(&request.letter),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Rejects incomplete requests, picks the API key, and runs the pipeline.
async fn run_validated(
    state: &AppState,
    letter: LetterRequest,
    api_key: Option<String>,
) -> Result<RunResult, AppError> {
    let missing = letter.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let llm = match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => state.llm.with_api_key(key),
        None if state.llm.has_api_key() => state.llm.clone(),
        None => {
            return Err(AppError::Validation(
                "An Anthropic API key is required: set ANTHROPIC_API_KEY or pass api_key"
                    .to_string(),
            ))
        }
    };

    let letter_date = Local::now().date_naive();
    let result = run_letter_pipeline(
        &llm,
        letter,
        &state.config.revision_policy(),
        letter_date,
    )
    .await?;
    Ok(result)
}

fn invalid_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

/// Decodes a closed-set form value using the same names the JSON API accepts.
fn parse_choice<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, AppError> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| AppError::Validation(format!("Unknown {field} '{}'", raw.trim())))
}

#[derive(Debug, Default)]
struct UploadForm {
    candidate_name: String,
    recommender_role: Option<String>,
    target_program: String,
    locale: Option<String>,
    raw_materials: Option<String>,
    api_key: Option<String>,
    document_text: Option<String>,
}

impl UploadForm {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "candidate_name" => self.candidate_name = value,
            "recommender_role" => self.recommender_role = Some(value),
            "target_program" => self.target_program = value,
            "locale" => self.locale = Some(value),
            "raw_materials" => self.raw_materials = Some(value),
            "api_key" => self.api_key = Some(value),
            _ => {}
        }
    }

    fn into_request(self) -> Result<(LetterRequest, Option<String>), AppError> {
        let recommender_role: RecommenderRole = match self.recommender_role.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_choice("recommender_role", raw)?,
            _ => {
                return Err(AppError::Validation(
                    "Missing required fields: recommender_role".to_string(),
                ))
            }
        };
        let locale: Locale = match self.locale.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_choice("locale", raw)?,
            _ => Locale::default(),
        };

        let raw_materials = compose_materials(
            locale,
            self.document_text.as_deref(),
            self.raw_materials.as_deref(),
        );

        Ok((
            LetterRequest {
                candidate_name: self.candidate_name,
                recommender_role,
                target_program: self.target_program,
                raw_materials,
                locale,
            },
            self.api_key,
        ))
    }
}
