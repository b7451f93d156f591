//! Schema.org JSON-LD markup for generated articles.
//!
//! Articles emit an `Article` object; an article containing an ordered step
//! sequence emits `HowTo` with one `HowToStep` per step instead.

use serde_json::{json, Value};

use article_core::types::{ContentSection, GeneratedArticle};

/// Publisher name used when the caller supplies none.
pub const DEFAULT_ORGANIZATION: &str = "Article Express";

pub fn schema_markup(article: &GeneratedArticle, organization: &str) -> Value {
    let steps = howto_steps(article);
    let schema_type = if steps.is_empty() { "Article" } else { "HowTo" };

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": schema_type,
        "headline": article.title,
        "description": article.meta.description,
        "keywords": article.meta.keywords.join(", "),
        "datePublished": article.generated_at.to_rfc3339(),
        "dateModified": article.generated_at.to_rfc3339(),
        "author": {
            "@type": "Organization",
            "name": organization,
        },
        "publisher": {
            "@type": "Organization",
            "name": organization,
        },
    });

    if !steps.is_empty() {
        schema["step"] = Value::Array(steps);
    }

    schema
}

fn howto_steps(article: &GeneratedArticle) -> Vec<Value> {
    let mut out = Vec::new();
    for section in &article.content_sections {
        if let ContentSection::Steps { steps, .. } = section {
            for step in steps {
                out.push(json!({
                    "@type": "HowToStep",
                    "name": step.title,
                    "text": step.description,
                }));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_article;

    #[test]
    fn test_article_schema_shape() {
        let article = sample_article("listicle", 71);
        let schema = schema_markup(&article, DEFAULT_ORGANIZATION);

        assert_eq!(schema["@type"], "Article");
        assert_eq!(schema["headline"], article.title.as_str());
        assert_eq!(schema["description"], article.meta.description.as_str());
        assert_eq!(schema["publisher"]["name"], DEFAULT_ORGANIZATION);
        assert!(schema.get("step").is_none());
    }

    #[test]
    fn test_step_sequence_becomes_howto() {
        let article = sample_article("how_to", 72);
        let schema = schema_markup(&article, "Acme");

        assert_eq!(schema["@type"], "HowTo");
        assert_eq!(schema["author"]["name"], "Acme");

        let steps = schema["step"].as_array().unwrap();
        let step_count: usize = article
            .content_sections
            .iter()
            .map(|s| match s {
                article_core::types::ContentSection::Steps { steps, .. } => steps.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(steps.len(), step_count);
        assert!(steps.iter().all(|s| s["@type"] == "HowToStep"));
    }

    #[test]
    fn test_dates_are_rfc3339() {
        let article = sample_article("comparison", 73);
        let schema = schema_markup(&article, DEFAULT_ORGANIZATION);
        assert_eq!(
            schema["datePublished"],
            article.generated_at.to_rfc3339().as_str()
        );
        assert_eq!(schema["datePublished"], schema["dateModified"]);
    }
}
