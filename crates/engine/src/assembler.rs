//! Builds the title, intro, content sections, conclusion, and takeaways for
//! one article from a template definition and a drawn context.

use rand::Rng;
use tracing::debug;

use article_core::types::{ContentSection, Resource, Step, Subsection};
use article_core::{ArticleResult, EngineConfig};

use crate::pools::VariablePools;
use crate::registry::{SectionBlueprint, TemplateDefinition};
use crate::resolver::{self, GenerationContext};

/// Result of a bounded-attempts loop: either a value accepted within budget,
/// or the best-effort value produced when the budget ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    Accepted(T),
    Exhausted(T),
}

impl<T> Attempt<T> {
    pub fn into_inner(self) -> T {
        match self {
            Attempt::Accepted(v) | Attempt::Exhausted(v) => v,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Attempt::Exhausted(_))
    }
}

/// Everything the assembly stage produces for one article, before SEO
/// annotation.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub template_type: String,
    pub title: String,
    pub intro: String,
    pub sections: Vec<ContentSection>,
    pub conclusion: String,
    pub takeaways: Vec<String>,
    /// Resolved value of the definition's primary token.
    pub primary_keyword: String,
    /// Resolved values of the bound tokens that appeared in the title
    /// pattern, in order of appearance.
    pub title_keywords: Vec<String>,
}

/// Per-template-type content builder.
#[derive(Debug, Clone)]
pub struct ContentAssembler {
    item_retries: usize,
    max_takeaways: usize,
    comparison_entities: usize,
}

impl ContentAssembler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            item_retries: config.item_retries,
            max_takeaways: config.max_takeaways,
            comparison_entities: config.comparison_entities.max(2),
        }
    }

    /// Build one article draft. `EmptyPool` / `UnresolvedToken` failures
    /// propagate unchanged and abort only this article.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        def: &TemplateDefinition,
        pools: &VariablePools,
        ctx: &GenerationContext,
        rng: &mut R,
    ) -> ArticleResult<ArticleDraft> {
        let title_pattern = pick(&def.title_patterns, rng);
        let title = resolver::render(title_pattern, ctx)?;
        let intro = resolver::render(pick(&def.intro_patterns, rng), ctx)?;

        let sections = match &def.blueprint {
            SectionBlueprint::Listicle {
                item_title_patterns,
                item_body_patterns,
                benefit_patterns,
            } => self.listicle_sections(
                item_title_patterns,
                item_body_patterns,
                benefit_patterns,
                ctx,
                rng,
            )?,
            SectionBlueprint::HowTo {
                prerequisites,
                step_title_patterns,
                step_body_patterns,
                tip_patterns,
            } => self.howto_sections(
                prerequisites,
                step_title_patterns,
                step_body_patterns,
                tip_patterns,
                ctx,
            )?,
            SectionBlueprint::Comparison {
                attributes,
                cell_patterns,
                analysis_title_patterns,
                analysis_body_patterns,
            } => self.comparison_sections(
                def,
                attributes,
                cell_patterns,
                analysis_title_patterns,
                analysis_body_patterns,
                pools,
                ctx,
                rng,
            )?,
            SectionBlueprint::Guide {
                subsection_title_patterns,
                subsection_body_patterns,
                resources,
            } => self.guide_sections(
                subsection_title_patterns,
                subsection_body_patterns,
                resources,
                ctx,
                rng,
            )?,
        };

        let conclusion = resolver::render(pick(&def.conclusion_patterns, rng), ctx)?;
        let takeaways = self.takeaways(&def.takeaway_patterns, ctx, rng)?;

        let primary_keyword = ctx
            .value(&def.primary_token)
            .unwrap_or_default()
            .to_string();
        let title_keywords = resolver::tokens(title_pattern)
            .iter()
            .filter_map(|t| ctx.value(t))
            .map(str::to_string)
            .collect();

        debug!(
            template_type = %def.template_type,
            sections = sections.len(),
            "assembled article draft"
        );

        Ok(ArticleDraft {
            template_type: def.template_type.clone(),
            title,
            intro,
            sections,
            conclusion,
            takeaways,
            primary_keyword,
            title_keywords,
        })
    }

    /// `number` independent list items. A resolved title+body identical to
    /// an earlier item is rejected and re-resolved within the retry budget;
    /// once exhausted, the near-duplicate is accepted as a fallback.
    fn listicle_sections<R: Rng + ?Sized>(
        &self,
        title_patterns: &[String],
        body_patterns: &[String],
        benefit_patterns: &[String],
        ctx: &GenerationContext,
        rng: &mut R,
    ) -> ArticleResult<Vec<ContentSection>> {
        let mut sections = Vec::with_capacity(ctx.number);
        let mut seen: Vec<String> = Vec::new();

        for i in 0..ctx.number {
            let item = self.resolve_unique_item(title_patterns, body_patterns, &seen, ctx, rng)?;
            let (title, content) = item.into_inner();
            seen.push(format!("{title}\n{content}"));

            let benefits = sample_rendered(benefit_patterns, 3, ctx, rng)?;

            sections.push(ContentSection::ListItem {
                number: (i + 1) as u32,
                title,
                content,
                benefits,
            });
        }

        Ok(sections)
    }

    fn resolve_unique_item<R: Rng + ?Sized>(
        &self,
        title_patterns: &[String],
        body_patterns: &[String],
        seen: &[String],
        ctx: &GenerationContext,
        rng: &mut R,
    ) -> ArticleResult<Attempt<(String, String)>> {
        let mut last = None;
        for _ in 0..=self.item_retries {
            let title = resolver::render(pick(title_patterns, rng), ctx)?;
            let content = resolver::render(pick(body_patterns, rng), ctx)?;
            let key = format!("{title}\n{content}");
            if !seen.contains(&key) {
                return Ok(Attempt::Accepted((title, content)));
            }
            last = Some((title, content));
        }
        // Budget exhausted; accept the near-duplicate.
        Ok(Attempt::Exhausted(last.expect("at least one attempt")))
    }

    fn howto_sections(
        &self,
        prerequisites: &[String],
        step_title_patterns: &[String],
        step_body_patterns: &[String],
        tip_patterns: &[String],
        ctx: &GenerationContext,
    ) -> ArticleResult<Vec<ContentSection>> {
        let mut sections = Vec::with_capacity(3);

        sections.push(ContentSection::Resources {
            title: "What You'll Need".to_string(),
            resources: prerequisites
                .iter()
                .map(|p| {
                    Ok(Resource {
                        resource_type: "Requirement".to_string(),
                        description: resolver::render(p, ctx)?,
                    })
                })
                .collect::<ArticleResult<Vec<_>>>()?,
        });

        // `number` ordered steps; patterns cycle when the list is shorter
        // than the requested count.
        let steps = (0..ctx.number)
            .map(|i| {
                Ok(Step {
                    title: resolver::render(
                        &step_title_patterns[i % step_title_patterns.len()],
                        ctx,
                    )?,
                    description: resolver::render(
                        &step_body_patterns[i % step_body_patterns.len()],
                        ctx,
                    )?,
                })
            })
            .collect::<ArticleResult<Vec<_>>>()?;
        sections.push(ContentSection::Steps {
            title: "Step-by-Step Instructions".to_string(),
            steps,
        });

        sections.push(ContentSection::Resources {
            title: "Pro Tips".to_string(),
            resources: tip_patterns
                .iter()
                .map(|t| {
                    Ok(Resource {
                        resource_type: "Tip".to_string(),
                        description: resolver::render(t, ctx)?,
                    })
                })
                .collect::<ArticleResult<Vec<_>>>()?,
        });

        Ok(sections)
    }

    #[allow(clippy::too_many_arguments)]
    fn comparison_sections<R: Rng + ?Sized>(
        &self,
        def: &TemplateDefinition,
        attributes: &[String],
        cell_patterns: &[String],
        analysis_title_patterns: &[String],
        analysis_body_patterns: &[String],
        pools: &VariablePools,
        ctx: &GenerationContext,
        rng: &mut R,
    ) -> ArticleResult<Vec<ContentSection>> {
        // Header: "Feature" + one column per compared entity. The first
        // entity is the primary value; the second is the bound competitor;
        // any further entities draw fresh names from the competitor's pool.
        let mut headers = vec!["Feature".to_string()];
        headers.push(ctx.value(&def.primary_token).unwrap_or_default().to_string());
        if let Some(competitor) = ctx.value("competitor") {
            headers.push(competitor.to_string());
        }
        if let Some(binding) = def.required_tokens.iter().find(|b| b.token == "competitor") {
            while headers.len() < self.comparison_entities + 1 {
                headers.push(pools.pick(&binding.pool, rng)?.to_string());
            }
        }

        let entity_count = headers.len() - 1;
        let rows = attributes
            .iter()
            .map(|attr| {
                let mut row = vec![resolver::render(attr, ctx)?];
                for _ in 0..entity_count {
                    row.push(resolver::render(pick(cell_patterns, rng), ctx)?);
                }
                Ok(row)
            })
            .collect::<ArticleResult<Vec<_>>>()?;

        let subsections = analysis_title_patterns
            .iter()
            .zip(analysis_body_patterns)
            .map(|(title, body)| {
                Ok(Subsection {
                    title: resolver::render(title, ctx)?,
                    content: resolver::render(body, ctx)?,
                })
            })
            .collect::<ArticleResult<Vec<_>>>()?;

        Ok(vec![
            ContentSection::ComparisonTable {
                title: "Feature Comparison".to_string(),
                headers,
                rows,
            },
            ContentSection::Subsections {
                title: "Detailed Analysis".to_string(),
                subsections,
            },
        ])
    }

    fn guide_sections<R: Rng + ?Sized>(
        &self,
        subsection_title_patterns: &[String],
        subsection_body_patterns: &[String],
        resources: &[(String, String)],
        ctx: &GenerationContext,
        rng: &mut R,
    ) -> ArticleResult<Vec<ContentSection>> {
        // Distinct subsection titles in pattern order; a count beyond the
        // pattern list is capped rather than repeated.
        let count = ctx.number.min(subsection_title_patterns.len());
        let subsections = subsection_title_patterns
            .iter()
            .take(count)
            .map(|title| {
                Ok(Subsection {
                    title: resolver::render(title, ctx)?,
                    content: resolver::render(pick(subsection_body_patterns, rng), ctx)?,
                })
            })
            .collect::<ArticleResult<Vec<_>>>()?;

        let resources = resources
            .iter()
            .map(|(kind, desc)| {
                Ok(Resource {
                    resource_type: kind.clone(),
                    description: resolver::render(desc, ctx)?,
                })
            })
            .collect::<ArticleResult<Vec<_>>>()?;

        Ok(vec![
            ContentSection::Subsections {
                title: "Inside This Guide".to_string(),
                subsections,
            },
            ContentSection::Resources {
                title: "Additional Resources".to_string(),
                resources,
            },
        ])
    }

    /// Draw up to `max_takeaways` takeaways; duplicates collapse under set
    /// semantics so the result may be shorter than the cap.
    fn takeaways<R: Rng + ?Sized>(
        &self,
        takeaway_patterns: &[String],
        ctx: &GenerationContext,
        rng: &mut R,
    ) -> ArticleResult<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for _ in 0..self.max_takeaways {
            let rendered = resolver::render(pick(takeaway_patterns, rng), ctx)?;
            if !out.contains(&rendered) {
                out.push(rendered);
            }
        }
        Ok(out)
    }
}

fn pick<'a, R: Rng + ?Sized>(patterns: &'a [String], rng: &mut R) -> &'a str {
    &patterns[rng.gen_range(0..patterns.len())]
}

/// Render up to `n` distinct entries drawn from `patterns`.
fn sample_rendered<R: Rng + ?Sized>(
    patterns: &[String],
    n: usize,
    ctx: &GenerationContext,
    rng: &mut R,
) -> ArticleResult<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for _ in 0..n.min(patterns.len()) {
        let rendered = resolver::render(pick(patterns, rng), ctx)?;
        if !out.contains(&rendered) {
            out.push(rendered);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use article_core::rng;
    use crate::registry::TemplateRegistry;
    use std::collections::BTreeMap;

    fn assemble_one(template_type: &str, seed: u64) -> ArticleDraft {
        let pools = VariablePools::builtin();
        let registry = TemplateRegistry::builtin(&pools).unwrap();
        let def = registry.get(template_type).unwrap();
        let mut rng = rng::seeded(seed);
        let ctx = GenerationContext::draw(def, &pools, &mut rng, 7, 2026).unwrap();
        let assembler = ContentAssembler::new(&EngineConfig::default());
        assembler.assemble(def, &pools, &ctx, &mut rng).unwrap()
    }

    #[test]
    fn test_listicle_has_number_unique_items() {
        let draft = assemble_one("listicle", 11);
        assert_eq!(draft.sections.len(), 7);

        let mut texts = Vec::new();
        for section in &draft.sections {
            match section {
                ContentSection::ListItem { title, content, .. } => {
                    texts.push(format!("{title}\n{content}"));
                }
                other => panic!("unexpected section kind: {other:?}"),
            }
        }
        let before = texts.len();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), before, "list items must not repeat");
    }

    #[test]
    fn test_howto_shape() {
        let draft = assemble_one("how_to", 3);
        assert_eq!(draft.sections.len(), 3);
        match &draft.sections[1] {
            ContentSection::Steps { steps, .. } => assert_eq!(steps.len(), 7),
            other => panic!("expected steps, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_table_shape() {
        let draft = assemble_one("comparison", 4);
        match &draft.sections[0] {
            ContentSection::ComparisonTable { headers, rows, .. } => {
                assert_eq!(headers[0], "Feature");
                assert_eq!(headers.len(), 3); // Feature + 2 entities
                assert_eq!(rows.len(), 5);
                for row in rows {
                    assert_eq!(row.len(), headers.len());
                }
            }
            other => panic!("expected comparison table, got {other:?}"),
        }
    }

    #[test]
    fn test_location_held_constant_across_sections() {
        let pools = VariablePools::builtin();
        let registry = TemplateRegistry::builtin(&pools).unwrap();
        let def = registry.get("location_based").unwrap();
        let mut rng = rng::seeded(21);
        let ctx = GenerationContext::draw(def, &pools, &mut rng, 6, 2026).unwrap();
        let location = ctx.value("location").unwrap().to_string();

        let assembler = ContentAssembler::new(&EngineConfig::default());
        let draft = assembler.assemble(def, &pools, &ctx, &mut rng).unwrap();

        // Every subsection that names a location names the same one.
        let others: Vec<&str> = pools
            .resolve("locations")
            .unwrap()
            .iter()
            .map(String::as_str)
            .filter(|l| **l != *location)
            .collect();
        for section in &draft.sections {
            if let ContentSection::Subsections { subsections, .. } = section {
                for sub in subsections {
                    for other in &others {
                        assert!(!sub.title.contains(other));
                        assert!(!sub.content.contains(other));
                    }
                }
            }
        }
    }

    #[test]
    fn test_takeaways_deduped_and_capped() {
        let draft = assemble_one("ultimate_guide", 8);
        assert!(draft.takeaways.len() <= 5);
        let mut sorted = draft.takeaways.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), draft.takeaways.len());
    }

    #[test]
    fn test_empty_pool_aborts_assembly() {
        let pools = VariablePools::builtin();
        let registry = TemplateRegistry::builtin(&pools).unwrap();
        let def = registry.get("listicle").unwrap();

        let overrides = BTreeMap::from([("products".to_string(), Vec::new())]);
        let merged = pools.merged(&overrides);
        let mut rng = rng::seeded(1);

        let err = GenerationContext::draw(def, &merged, &mut rng, 5, 2026).unwrap_err();
        assert!(err.is_slot_recoverable());
    }

    #[test]
    fn test_duplicate_retry_exhaustion_is_tagged() {
        // Single title/body pattern with no tokens: every item resolves
        // identically, so the second item must come back Exhausted.
        let pools = VariablePools::builtin();
        let registry = TemplateRegistry::builtin(&pools).unwrap();
        let def = registry.get("listicle").unwrap();
        let mut rng = rng::seeded(2);
        let ctx = GenerationContext::draw(def, &pools, &mut rng, 5, 2026).unwrap();

        let assembler = ContentAssembler::new(&EngineConfig::default());
        let titles = vec!["Same Title".to_string()];
        let bodies = vec!["Same body.".to_string()];
        let seen = vec!["Same Title\nSame body.".to_string()];

        let attempt = assembler
            .resolve_unique_item(&titles, &bodies, &seen, &ctx, &mut rng)
            .unwrap();
        assert!(attempt.is_exhausted());
        assert_eq!(
            attempt.into_inner(),
            ("Same Title".to_string(), "Same body.".to_string())
        );
    }

    #[test]
    fn test_primary_and_title_keywords() {
        let draft = assemble_one("listicle", 13);
        assert!(!draft.primary_keyword.is_empty());
        assert!(draft.title.contains(&draft.primary_keyword) || !draft.title_keywords.is_empty());
    }
}
