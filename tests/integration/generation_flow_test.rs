//! Integration test for the full generation flow: request in, batch run,
//! rendered output in every format.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use article_core::types::*;
    use article_core::{rng, EngineConfig};
    use article_engine::{BatchOrchestrator, TemplateRegistry, VariablePools};

    fn orchestrator() -> BatchOrchestrator {
        let pools = Arc::new(VariablePools::builtin());
        let registry = Arc::new(TemplateRegistry::builtin(&pools).unwrap());
        BatchOrchestrator::new(registry, pools, EngineConfig::default())
    }

    fn run_seeded(request: &GenerationRequest, seed: u64) -> BatchOutcome {
        let mut seen = 0usize;
        let mut progress = |record: &ProgressRecord| {
            seen += 1;
            assert_eq!(record.completed, seen);
        };
        let mut rng = rng::seeded(seed);
        orchestrator()
            .run(request, &mut rng, &mut progress, None)
            .unwrap()
    }

    #[test]
    fn test_distributed_batch_generates_and_renders() {
        let mut request = GenerationRequest::distributed(12);
        request.fixed_timestamp = Some(chrono::Utc::now());

        let outcome = run_seeded(&request, 2026);

        assert_eq!(outcome.status, BatchStatus::Completed);
        assert_eq!(outcome.result.articles.len(), 12);
        assert_eq!(outcome.failed_count, 0);

        let counted: usize = outcome.result.distribution.values().sum();
        assert_eq!(counted, 12);

        for article in &outcome.result.articles {
            assert!(!article.title.is_empty());
            assert!(!article.content_sections.is_empty());
            assert!(article.word_count > 0);
            assert!(article.seo_score <= 100);

            let json = article_formats::to_json(article).unwrap();
            let back = article_formats::from_json(&json).unwrap();
            assert_eq!(*article, back);

            let markdown = article_formats::to_markdown(article);
            assert!(markdown.starts_with(&format!("# {}", article.title)));

            let html = article_formats::to_html(article);
            assert!(html.starts_with("<!DOCTYPE html>"));

            assert!(!article_formats::slugify(&article.title).is_empty());
        }
    }

    #[test]
    fn test_seeded_runs_reproduce_identical_manifests() {
        let mut request = GenerationRequest::distributed(6);
        request.fixed_timestamp = Some(
            chrono::DateTime::parse_from_rfc3339("2026-03-01T00:00:00Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
        );

        let first = run_seeded(&request, 99);
        let second = run_seeded(&request, 99);

        let a = article_formats::outcome_to_json(&first).unwrap();
        let b = article_formats::outcome_to_json(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pinned_batch_with_pool_overrides() {
        let mut request = GenerationRequest::pinned("listicle", 4);
        request.variables.insert(
            "products".to_string(),
            vec!["WidgetPro".to_string(), "WidgetLite".to_string()],
        );

        let outcome = run_seeded(&request, 7);

        assert_eq!(outcome.status, BatchStatus::Completed);
        assert_eq!(outcome.result.distribution.get("listicle"), Some(&4));
        for article in &outcome.result.articles {
            assert_eq!(article.template_type, "listicle");
        }
        let mentions_override = outcome.result.articles.iter().any(|a| {
            let text = article_formats::to_markdown(a);
            text.contains("WidgetPro") || text.contains("WidgetLite")
        });
        assert!(mentions_override);
    }

    #[test]
    fn test_unknown_pinned_template_is_rejected() {
        let request = GenerationRequest::pinned("press_release", 2);
        let mut rng = rng::seeded(1);
        let mut progress = |_: &ProgressRecord| {};
        let err = orchestrator()
            .run(&request, &mut rng, &mut progress, None)
            .unwrap_err();
        assert!(matches!(
            err,
            article_core::ArticleError::UnknownTemplate(_)
        ));
    }
}
