//! Fills `{token}` slots in pattern strings from a per-article context.
//!
//! Resolution is stateless per call: all randomness happens when the context
//! is drawn, so the same pattern and context always render identically.

use std::collections::BTreeMap;

use rand::Rng;

use article_core::{ArticleError, ArticleResult};

use crate::pools::VariablePools;
use crate::registry::TemplateDefinition;

/// Token names computed from the generation context rather than a pool.
const DERIVED_TOKENS: &[&str] = &["number", "count", "year"];

pub fn is_derived(token: &str) -> bool {
    DERIVED_TOKENS.contains(&token)
}

/// Extract the token names referenced by a pattern, in order of appearance.
/// An unterminated `{` is treated as literal text.
pub fn tokens(pattern: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                out.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    out
}

/// Per-article resolution context: one value per bound token, drawn once,
/// plus the derived scalars.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    values: BTreeMap<String, String>,
    /// Requested list length; also serves the `count` alias.
    pub number: usize,
    pub year: i32,
}

impl GenerationContext {
    /// Draw one value per required token of `def` from the caller's rng.
    /// Every bound value is held constant for the article's lifetime, so
    /// e.g. a `{location}` template describes a single location throughout.
    pub fn draw<R: Rng + ?Sized>(
        def: &TemplateDefinition,
        pools: &VariablePools,
        rng: &mut R,
        number: usize,
        year: i32,
    ) -> ArticleResult<Self> {
        let mut values = BTreeMap::new();
        for binding in &def.required_tokens {
            let value = pools.pick(&binding.pool, rng)?;
            values.insert(binding.token.clone(), value.to_string());
        }
        Ok(Self {
            values,
            number,
            year,
        })
    }

    pub fn value(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// All bound token values, keyed by token name. Callers needing values
    /// in title order extract them from the title pattern via [`tokens`].
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    fn scalar(&self, token: &str) -> Option<String> {
        match token {
            "number" | "count" => Some(self.number.to_string()),
            "year" => Some(self.year.to_string()),
            _ => None,
        }
    }
}

/// Render `pattern` against `ctx`. An unresolved token is a registry/config
/// mismatch (registry validation guarantees it cannot happen for catalog
/// templates) and surfaces as `UnresolvedToken`.
pub fn render(pattern: &str, ctx: &GenerationContext) -> ArticleResult<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let token = &after[..end];
                if let Some(value) = ctx.value(token) {
                    out.push_str(value);
                } else if let Some(value) = ctx.scalar(token) {
                    out.push_str(&value);
                } else {
                    return Err(ArticleError::UnresolvedToken(token.to_string()));
                }
                rest = &after[end + 1..];
            }
            None => {
                // Literal unterminated brace.
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    // Collapse the continuation whitespace that multi-line pattern literals
    // carry.
    Ok(out.split_whitespace().collect::<Vec<_>>().join(" "))
}
