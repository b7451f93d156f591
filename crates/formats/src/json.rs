//! Record-format serialization. Exactly invertible: deserializing the
//! output reproduces an identical `GeneratedArticle`.

use article_core::types::{BatchOutcome, GeneratedArticle};
use article_core::ArticleResult;

pub fn to_json(article: &GeneratedArticle) -> ArticleResult<String> {
    Ok(serde_json::to_string_pretty(article)?)
}

pub fn from_json(json: &str) -> ArticleResult<GeneratedArticle> {
    Ok(serde_json::from_str(json)?)
}

pub fn outcome_to_json(outcome: &BatchOutcome) -> ArticleResult<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_article;

    #[test]
    fn test_round_trip_is_exact() {
        let article = sample_article("listicle", 41);
        let json = to_json(&article).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(article, back);
    }

    #[test]
    fn test_every_template_type_round_trips() {
        for (i, template_type) in [
            "listicle",
            "how_to",
            "comparison",
            "ultimate_guide",
            "location_based",
            "crypto_focused",
            "developer_focused",
        ]
        .iter()
        .enumerate()
        {
            let article = sample_article(template_type, 100 + i as u64);
            let back = from_json(&to_json(&article).unwrap()).unwrap();
            assert_eq!(article, back, "round trip failed for {template_type}");
        }
    }

    #[test]
    fn test_section_tags_are_snake_case() {
        let article = sample_article("how_to", 7);
        let json = to_json(&article).unwrap();
        assert!(json.contains("\"type\": \"steps\""));
        assert!(json.contains("\"type\": \"resources\""));
    }
}
