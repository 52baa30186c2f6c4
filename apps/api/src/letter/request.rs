//! Letter request — identity parameters and raw material for one run.

use serde::{Deserialize, Serialize};

use crate::letter::prompts::{templates_for, LocaleTemplates};

/// Output language of a run. Selects every instruction template sent to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "English")]
    English,
    #[serde(rename = "zh-TW", alias = "繁體中文")]
    TraditionalChinese,
}

impl Locale {
    pub fn templates(&self) -> &'static LocaleTemplates {
        templates_for(*self)
    }
}

/// The recommender's relationship to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommenderRole {
    #[serde(alias = "Professor", alias = "教授")]
    Professor,
    #[serde(alias = "Manager", alias = "經理")]
    Manager,
    #[serde(alias = "Supervisor", alias = "主管")]
    Supervisor,
    #[serde(alias = "Research Advisor", alias = "研究顧問")]
    ResearchAdvisor,
}

impl RecommenderRole {
    /// Display label in the letter's language.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (RecommenderRole::Professor, Locale::English) => "Professor",
            (RecommenderRole::Manager, Locale::English) => "Manager",
            (RecommenderRole::Supervisor, Locale::English) => "Supervisor",
            (RecommenderRole::ResearchAdvisor, Locale::English) => "Research Advisor",
            (RecommenderRole::Professor, Locale::TraditionalChinese) => "教授",
            (RecommenderRole::Manager, Locale::TraditionalChinese) => "經理",
            (RecommenderRole::Supervisor, Locale::TraditionalChinese) => "主管",
            (RecommenderRole::ResearchAdvisor, Locale::TraditionalChinese) => "研究顧問",
        }
    }
}

/// Immutable input to a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterRequest {
    pub candidate_name: String,
    pub recommender_role: RecommenderRole,
    pub target_program: String,
    /// Concatenation of any extracted document text and manual entry.
    pub raw_materials: String,
    #[serde(default)]
    pub locale: Locale,
}

impl LetterRequest {
    /// Returns the name of every required field that is blank.
    ///
    /// The pipeline itself does not call this; callers reject bad requests
    /// before a run starts.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.candidate_name.trim().is_empty() {
            missing.push("candidate_name");
        }
        if self.target_program.trim().is_empty() {
            missing.push("target_program");
        }
        if self.raw_materials.trim().is_empty() {
            missing.push("raw_materials");
        }
        missing
    }
}

/// Joins uploaded-document text and manual notes under localized section headers.
///
/// Whitespace-only parts are skipped; if both are blank the result is empty.
pub fn compose_materials(locale: Locale, document_text: Option<&str>, manual: Option<&str>) -> String {
    let t = locale.templates();
    let mut combined = String::new();

    if let Some(doc) = document_text.filter(|s| !s.trim().is_empty()) {
        combined.push_str(t.document_header);
        combined.push('\n');
        combined.push_str(doc);
        combined.push_str("\n\n");
    }
    if let Some(notes) = manual.filter(|s| !s.trim().is_empty()) {
        combined.push_str(t.manual_header);
        combined.push('\n');
        combined.push_str(notes);
    }

    combined
}
