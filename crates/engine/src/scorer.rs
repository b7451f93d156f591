//! SEO metrics and metadata for assembled articles: word count, keyword
//! density, a Flesch-style readability proxy, meta description/keywords,
//! and the 0-100 composite score.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use article_core::types::{ArticleMeta, ContentSection, GeneratedArticle, SeoThresholds};
use article_core::EngineConfig;

use crate::assembler::ArticleDraft;

const FLESCH_BASE: f64 = 206.835;
const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

/// Computes SEO annotations. Deterministic given the draft and thresholds;
/// no randomness.
#[derive(Debug, Clone)]
pub struct SeoScorer {
    meta_max_chars: usize,
}

impl SeoScorer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            meta_max_chars: config.meta_description_max_chars,
        }
    }

    /// Consume a draft and return the finished, annotated article. The
    /// draft is never mutated in place; annotation produces a new value.
    pub fn annotate(
        &self,
        draft: ArticleDraft,
        thresholds: &SeoThresholds,
        id: Uuid,
        generated_at: DateTime<Utc>,
    ) -> GeneratedArticle {
        let text = extract_text(&draft);
        let word_count = count_words(&text);
        let keyword_density = density(&text, word_count, &draft.primary_keyword);
        let density_in_range = keyword_density >= thresholds.target_density * 0.5
            && keyword_density <= thresholds.target_density * 2.0;
        let readability = flesch_score(&text);

        let description = self.meta_description(&draft.intro);
        let keywords = self.keywords(&draft);

        let seo_score = composite_score(
            word_count,
            keyword_density,
            density_in_range,
            &description,
            draft.takeaways.len(),
            thresholds,
        );

        debug!(
            word_count,
            keyword_density, readability, seo_score, "annotated article"
        );

        GeneratedArticle {
            id,
            title: draft.title,
            intro: draft.intro,
            template_type: draft.template_type,
            generated_at,
            content_sections: draft.sections,
            conclusion: draft.conclusion,
            key_takeaways: draft.takeaways,
            meta: ArticleMeta {
                description,
                keywords,
            },
            word_count,
            keyword_density,
            density_in_range,
            readability,
            seo_score,
        }
    }

    /// Meta description derived from the intro, truncated at the last word
    /// boundary inside the budget, with an ellipsis appended. An intro
    /// whose first word alone exceeds the budget falls back to a hard
    /// character cut.
    fn meta_description(&self, intro: &str) -> String {
        if intro.chars().count() <= self.meta_max_chars {
            return intro.trim().to_string();
        }

        let budget = self.meta_max_chars.saturating_sub(3);
        let mut cut: String = intro.chars().take(budget).collect();
        if let Some(idx) = cut.rfind(' ') {
            cut.truncate(idx);
        }
        format!("{}...", cut.trim_end())
    }

    /// Primary keyword plus up to 4 other resolved title token values,
    /// deduplicated, insertion order preserved.
    fn keywords(&self, draft: &ArticleDraft) -> Vec<String> {
        let mut out = Vec::with_capacity(5);
        if !draft.primary_keyword.is_empty() {
            out.push(draft.primary_keyword.clone());
        }
        for value in &draft.title_keywords {
            if out.len() >= 5 {
                break;
            }
            if !out.contains(value) {
                out.push(value.clone());
            }
        }
        out
    }
}

/// All textual content of a draft: title, intro, every section's text,
/// conclusion, takeaways.
pub fn extract_text(draft: &ArticleDraft) -> String {
    let mut parts: Vec<&str> = vec![&draft.title, &draft.intro];
    for section in &draft.sections {
        collect_section_text(section, &mut parts);
    }
    parts.push(&draft.conclusion);
    for takeaway in &draft.takeaways {
        parts.push(takeaway);
    }
    parts.join(" ")
}

/// The same extraction over a finished article, used to recompute the word
/// count independently of the scorer.
pub fn extract_article_text(article: &GeneratedArticle) -> String {
    let mut parts: Vec<&str> = vec![&article.title, &article.intro];
    for section in &article.content_sections {
        collect_section_text(section, &mut parts);
    }
    parts.push(&article.conclusion);
    for takeaway in &article.key_takeaways {
        parts.push(takeaway);
    }
    parts.join(" ")
}

fn collect_section_text<'a>(section: &'a ContentSection, parts: &mut Vec<&'a str>) {
    match section {
        ContentSection::ListItem {
            title,
            content,
            benefits,
            ..
        } => {
            parts.push(title);
            parts.push(content);
            parts.extend(benefits.iter().map(String::as_str));
        }
        ContentSection::Steps { title, steps } => {
            parts.push(title);
            for step in steps {
                parts.push(&step.title);
                parts.push(&step.description);
            }
        }
        ContentSection::ComparisonTable {
            title,
            headers,
            rows,
        } => {
            parts.push(title);
            parts.extend(headers.iter().map(String::as_str));
            for row in rows {
                parts.extend(row.iter().map(String::as_str));
            }
        }
        ContentSection::Subsections { title, subsections } => {
            parts.push(title);
            for sub in subsections {
                parts.push(&sub.title);
                parts.push(&sub.content);
            }
        }
        ContentSection::Resources { title, resources } => {
            parts.push(title);
            for res in resources {
                parts.push(&res.resource_type);
                parts.push(&res.description);
            }
        }
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn density(text: &str, word_count: usize, keyword: &str) -> f64 {
    if word_count == 0 || keyword.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let needle = keyword.to_lowercase();
    let occurrences = haystack.matches(&needle).count();
    occurrences as f64 / word_count as f64
}

/// Flesch Reading Ease over the full text, clamped to [0, 100]. Purely
/// informational; never blocks generation.
fn flesch_score(text: &str) -> f64 {
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let words: Vec<&str> = text.split_whitespace().collect();
    if sentences == 0 || words.is_empty() {
        return 0.0;
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let avg_sentence_len = words.len() as f64 / sentences as f64;
    let avg_syllables = syllables as f64 / words.len() as f64;

    let score =
        FLESCH_BASE - FLESCH_SENTENCE_WEIGHT * avg_sentence_len - FLESCH_SYLLABLE_WEIGHT * avg_syllables;
    score.clamp(0.0, 100.0)
}

/// Vowel-group syllable approximation with a silent-e adjustment; always at
/// least 1.
fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0usize;
    let mut previous_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }
    count.max(1)
}

/// Weighted composite: word count fit up to 30 (linear penalty outside the
/// range), density in range 30 (half credit when present but out of range),
/// non-empty meta description 20, >= 3 takeaways 20.
fn composite_score(
    word_count: usize,
    keyword_density: f64,
    density_in_range: bool,
    description: &str,
    takeaway_count: usize,
    thresholds: &SeoThresholds,
) -> u8 {
    let word_points = if word_count >= thresholds.min_word_count
        && word_count <= thresholds.max_word_count
    {
        30.0
    } else if word_count < thresholds.min_word_count {
        30.0 * word_count as f64 / thresholds.min_word_count.max(1) as f64
    } else {
        30.0 * thresholds.max_word_count as f64 / word_count as f64
    };

    let density_points = if density_in_range {
        30.0
    } else if keyword_density > 0.0 {
        15.0
    } else {
        0.0
    };

    let meta_points = if description.is_empty() { 0.0 } else { 20.0 };
    let takeaway_points = if takeaway_count >= 3 { 20.0 } else { 0.0 };

    (word_points + density_points + meta_points + takeaway_points).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use article_core::rng;
    use article_core::EngineConfig;
    use crate::assembler::ContentAssembler;
    use crate::pools::VariablePools;
    use crate::registry::TemplateRegistry;
    use crate::resolver::GenerationContext;

    fn annotated(template_type: &str, seed: u64) -> GeneratedArticle {
        let config = EngineConfig::default();
        let pools = VariablePools::builtin();
        let registry = TemplateRegistry::builtin(&pools).unwrap();
        let def = registry.get(template_type).unwrap();
        let mut rng = rng::seeded(seed);
        let ctx = GenerationContext::draw(def, &pools, &mut rng, 7, 2026).unwrap();
        let draft = ContentAssembler::new(&config)
            .assemble(def, &pools, &ctx, &mut rng)
            .unwrap();
        SeoScorer::new(&config).annotate(
            draft,
            &SeoThresholds::default(),
            Uuid::nil(),
            Utc::now(),
        )
    }

    #[test]
    fn test_word_count_matches_independent_recount() {
        let article = annotated("listicle", 17);
        let recount = count_words(&extract_article_text(&article));
        assert_eq!(article.word_count, recount);
        assert!(article.word_count >= 1);
    }

    #[test]
    fn test_score_bounded() {
        for template_type in ["listicle", "how_to", "comparison", "ultimate_guide"] {
            let article = annotated(template_type, 23);
            assert!(article.seo_score <= 100);
        }
    }

    #[test]
    fn test_meta_description_truncates_at_word_boundary() {
        let scorer = SeoScorer::new(&EngineConfig::default());
        let long_intro = "word ".repeat(80); // 400 chars
        let meta = scorer.meta_description(&long_intro);

        assert!(meta.chars().count() <= 160);
        assert!(meta.ends_with("..."));
        // The part before the ellipsis ends with a full word.
        let body = meta.trim_end_matches("...");
        assert!(body.ends_with("word"));
    }

    #[test]
    fn test_spaceless_intro_falls_back_to_hard_cut() {
        let scorer = SeoScorer::new(&EngineConfig::default());
        let intro = "x".repeat(300);
        let meta = scorer.meta_description(&intro);

        assert_eq!(meta.chars().count(), 160);
        assert!(meta.ends_with("..."));
        assert!(meta.trim_end_matches("...").chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_short_intro_passes_through() {
        let scorer = SeoScorer::new(&EngineConfig::default());
        let intro = "A short intro.";
        assert_eq!(scorer.meta_description(intro), intro);
    }

    #[test]
    fn test_keywords_primary_first_deduped() {
        let article = annotated("comparison", 29);
        assert!(!article.meta.keywords.is_empty());
        assert!(article.meta.keywords.len() <= 5);

        let mut sorted = article.meta.keywords.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), article.meta.keywords.len());
    }

    #[test]
    fn test_syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("table"), 1); // silent-e adjustment
        assert_eq!(count_syllables("audio"), 2); // au + io vowel groups
        assert_eq!(count_syllables("banana"), 3);
        assert_eq!(count_syllables("b"), 1); // floor at 1
    }

    #[test]
    fn test_composite_word_count_penalty_is_linear() {
        let thresholds = SeoThresholds {
            min_word_count: 100,
            max_word_count: 200,
            target_density: 0.02,
        };
        // Half the minimum words -> half the 30 points, rest unchanged.
        let half = composite_score(50, 0.02, true, "desc", 3, &thresholds);
        let full = composite_score(100, 0.02, true, "desc", 3, &thresholds);
        assert_eq!(full - half, 15);
    }

    #[test]
    fn test_annotation_is_deterministic() {
        let a = annotated("how_to", 31);
        let b = annotated("how_to", 31);
        assert_eq!(a.seo_score, b.seo_score);
        assert_eq!(a.word_count, b.word_count);
        assert_eq!(a.meta, b.meta);
    }
}
