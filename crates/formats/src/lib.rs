//! Output rendering for generated articles.
//!
//! Three encodings of the same article value: pretty JSON for storage and
//! round-tripping, Markdown for editorial review, and a standalone HTML
//! document carrying schema.org JSON-LD markup. [`slug`] derives
//! filesystem-safe names from article titles.

pub mod html;
pub mod json;
pub mod markdown;
pub mod schema;
pub mod slug;

pub use html::to_html;
pub use json::{from_json, outcome_to_json, to_json};
pub use markdown::to_markdown;
pub use schema::{schema_markup, DEFAULT_ORGANIZATION};
pub use slug::slugify;

#[cfg(test)]
pub(crate) mod test_support {
    use article_core::types::{GeneratedArticle, SeoThresholds};
    use article_core::EngineConfig;
    use article_engine::resolver::GenerationContext;
    use article_engine::{ContentAssembler, SeoScorer, TemplateRegistry, VariablePools};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    /// A fully assembled article with a pinned id and timestamp so the
    /// rendering tests see stable input for a given seed.
    pub fn sample_article(template_type: &str, seed: u64) -> GeneratedArticle {
        let config = EngineConfig::default();
        let pools = VariablePools::builtin();
        let registry = TemplateRegistry::builtin(&pools).unwrap();
        let def = registry.get(template_type).unwrap();

        let mut rng = article_core::rng::seeded(seed);
        let ctx = GenerationContext::draw(def, &pools, &mut rng, 5, 2026).unwrap();

        let assembler = ContentAssembler::new(&config);
        let draft = assembler.assemble(def, &pools, &ctx, &mut rng).unwrap();

        let scorer = SeoScorer::new(&config);
        let generated_at = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        scorer.annotate(
            draft,
            &SeoThresholds::default(),
            Uuid::from_u128(seed as u128),
            generated_at,
        )
    }
}
