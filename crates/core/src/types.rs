use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ordered step of a step-sequence section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub description: String,
}

/// A titled body block inside a subsection group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub content: String,
}

/// An entry in a resource list (documentation, tutorial, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub description: String,
}

/// One structural unit of an article body. Produced read-only by the
/// assembly engine; the tag drives per-kind rendering in every output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSection {
    ListItem {
        number: u32,
        title: String,
        content: String,
        benefits: Vec<String>,
    },
    Steps {
        title: String,
        steps: Vec<Step>,
    },
    ComparisonTable {
        title: String,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Subsections {
        title: String,
        subsections: Vec<Subsection>,
    },
    Resources {
        title: String,
        resources: Vec<Resource>,
    },
}

/// SEO metadata attached to a generated article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub description: String,
    pub keywords: Vec<String>,
}

/// A fully assembled and SEO-annotated article. Created exactly once by the
/// generation pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub id: Uuid,
    pub title: String,
    pub intro: String,
    pub template_type: String,
    pub generated_at: DateTime<Utc>,
    pub content_sections: Vec<ContentSection>,
    pub conclusion: String,
    pub key_takeaways: Vec<String>,
    pub meta: ArticleMeta,
    pub word_count: usize,
    pub keyword_density: f64,
    pub density_in_range: bool,
    pub readability: f64,
    pub seo_score: u8,
}

/// Word-count and keyword-density targets used by the SEO scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoThresholds {
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_density: f64,
}

impl Default for SeoThresholds {
    fn default() -> Self {
        Self {
            min_word_count: 300,
            max_word_count: 2500,
            target_density: 0.02,
        }
    }
}

/// How the orchestrator picks a template type per batch slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSelector {
    /// Every slot uses the configured `template_distribution`.
    #[default]
    Distribution,
    /// Every slot uses the named template type.
    Pinned(String),
}

/// Caller-supplied request for one batch generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub template: TemplateSelector,
    pub count: usize,
    /// Request-local pool overrides. An override replaces the default pool
    /// of the same name wholesale; there is no partial merge.
    #[serde(default)]
    pub variables: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub thresholds: SeoThresholds,
    /// Output format hints, opaque to the engine.
    #[serde(default)]
    pub formats: Vec<String>,
    /// Fixed generation timestamp for deterministic replay. Production
    /// callers leave this unset and get `Utc::now()` per batch.
    #[serde(default)]
    pub fixed_timestamp: Option<DateTime<Utc>>,
}

impl GenerationRequest {
    pub fn pinned(template_type: impl Into<String>, count: usize) -> Self {
        Self {
            template: TemplateSelector::Pinned(template_type.into()),
            count,
            variables: BTreeMap::new(),
            thresholds: SeoThresholds::default(),
            formats: Vec::new(),
            fixed_timestamp: None,
        }
    }

    pub fn distributed(count: usize) -> Self {
        Self {
            template: TemplateSelector::Distribution,
            count,
            variables: BTreeMap::new(),
            thresholds: SeoThresholds::default(),
            formats: Vec::new(),
            fixed_timestamp: None,
        }
    }
}

/// Terminal status of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Completed,
    Partial,
    Failed,
}

/// A recorded per-slot failure. Slot errors never escape the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotFailure {
    pub slot: usize,
    pub template_type: String,
    pub error: String,
}

/// What happened in the most recently processed slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotOutcome {
    Generated(Box<GeneratedArticle>),
    Failed(SlotFailure),
}

/// Emitted after every slot, success or failure. The only externally
/// observable event stream the engine produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub completed: usize,
    pub total: usize,
    pub outcome: SlotOutcome,
}

/// Ordered articles plus the realized per-type distribution.
///
/// `BTreeMap` keeps serialization byte-stable so seeded runs reproduce
/// identical results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub articles: Vec<GeneratedArticle>,
    pub distribution: BTreeMap<String, usize>,
}

/// Final outcome record terminating the progress stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub status: BatchStatus,
    pub result: BatchResult,
    pub failed_count: usize,
    pub failures: Vec<SlotFailure>,
    /// Titles accepted as duplicates after the retry budget was exhausted.
    pub duplicate_titles: usize,
}
