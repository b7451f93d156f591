use std::collections::BTreeMap;

use serde::Deserialize;

/// Root engine configuration. Loaded from environment variables with the
/// prefix `ARTICLE_EXPRESS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Ceiling on `GenerationRequest::count`.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Regeneration budget when a slot produces a duplicate title.
    #[serde(default = "default_slot_retries")]
    pub slot_retries: usize,
    /// Re-resolution budget when a list item duplicates another in the
    /// same article.
    #[serde(default = "default_item_retries")]
    pub item_retries: usize,
    /// A batch fails when more than this fraction of slots fail.
    #[serde(default = "default_max_failure_ratio")]
    pub max_failure_ratio: f64,
    #[serde(default = "default_max_takeaways")]
    pub max_takeaways: usize,
    #[serde(default = "default_meta_description_max_chars")]
    pub meta_description_max_chars: usize,
    /// Number of compared entities in a comparison table.
    #[serde(default = "default_comparison_entities")]
    pub comparison_entities: usize,
    /// Candidate list lengths for the derived `number` scalar.
    #[serde(default = "default_item_count_choices")]
    pub item_count_choices: Vec<usize>,
    /// Target fractions per template type for distribution-driven batches.
    /// Need not be pre-normalized.
    #[serde(default = "default_template_distribution")]
    pub template_distribution: BTreeMap<String, f64>,
}

fn default_max_articles() -> usize {
    500
}
fn default_slot_retries() -> usize {
    5
}
fn default_item_retries() -> usize {
    5
}
fn default_max_failure_ratio() -> f64 {
    0.2
}
fn default_max_takeaways() -> usize {
    5
}
fn default_meta_description_max_chars() -> usize {
    160
}
fn default_comparison_entities() -> usize {
    2
}
fn default_item_count_choices() -> Vec<usize> {
    vec![5, 7, 10, 12, 15]
}
fn default_template_distribution() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("listicle".to_string(), 0.3),
        ("how_to".to_string(), 0.25),
        ("comparison".to_string(), 0.2),
        ("ultimate_guide".to_string(), 0.15),
        ("location_based".to_string(), 0.1),
    ])
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_articles: default_max_articles(),
            slot_retries: default_slot_retries(),
            item_retries: default_item_retries(),
            max_failure_ratio: default_max_failure_ratio(),
            max_takeaways: default_max_takeaways(),
            meta_description_max_chars: default_meta_description_max_chars(),
            comparison_entities: default_comparison_entities(),
            item_count_choices: default_item_count_choices(),
            template_distribution: default_template_distribution(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ARTICLE_EXPRESS")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
