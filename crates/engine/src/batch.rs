//! Sequential batch orchestration: per-slot template selection, batch-level
//! title uniqueness, failure isolation, progress reporting, and cancellation.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Datelike, Utc};
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use article_core::types::{
    BatchOutcome, BatchResult, BatchStatus, GenerationRequest, ProgressRecord, SlotFailure,
    SlotOutcome, TemplateSelector,
};
use article_core::{ArticleError, ArticleResult, EngineConfig};

use crate::assembler::ContentAssembler;
use crate::pools::VariablePools;
use crate::registry::TemplateRegistry;
use crate::resolver::GenerationContext;
use crate::scorer::SeoScorer;

/// Shared flag for mid-run cancellation. Checked between slots, never
/// inside slot assembly; slots completed so far are retained.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ─── Batch state machine ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Describes a single valid state transition for a batch run.
#[derive(Debug, Clone)]
struct StateTransition {
    from: BatchState,
    to: BatchState,
}

/// Guards the batch lifecycle with a finite set of valid transitions.
#[derive(Debug, Clone)]
pub struct BatchStateMachine {
    pub state: BatchState,
    transitions: Vec<StateTransition>,
}

impl BatchStateMachine {
    pub fn new() -> Self {
        let transitions = vec![
            StateTransition {
                from: BatchState::Idle,
                to: BatchState::Running,
            },
            StateTransition {
                from: BatchState::Running,
                to: BatchState::Completed,
            },
            StateTransition {
                from: BatchState::Running,
                to: BatchState::Failed,
            },
        ];
        Self {
            state: BatchState::Idle,
            transitions,
        }
    }

    pub fn can_transition(&self, to: BatchState) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from == self.state && t.to == to)
    }

    pub fn transition(&mut self, to: BatchState) -> ArticleResult<()> {
        if self.can_transition(to) {
            self.state = to;
            Ok(())
        } else {
            Err(ArticleError::InvalidTransition(format!(
                "{:?} -> {:?}",
                self.state, to
            )))
        }
    }
}

impl Default for BatchStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Template selection ─────────────────────────────────────────────────────

/// Running-deficit selection: at each slot the type with the largest
/// (target fraction x slots-so-far) minus (count already emitted) wins, so
/// the realized distribution tracks the targets at every prefix.
#[derive(Debug, Clone)]
struct DeficitSelector {
    targets: Vec<(String, f64)>,
    emitted: BTreeMap<String, usize>,
    slot: usize,
}

impl DeficitSelector {
    /// Normalizes the configured fractions over the types the registry
    /// actually knows.
    fn new(
        distribution: &BTreeMap<String, f64>,
        registry: &TemplateRegistry,
    ) -> ArticleResult<Self> {
        let known: Vec<(String, f64)> = distribution
            .iter()
            .filter(|(k, v)| registry.get(k).is_ok() && **v > 0.0)
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        let total: f64 = known.iter().map(|(_, v)| v).sum();
        if known.is_empty() || total <= 0.0 {
            return Err(ArticleError::Validation(
                "template distribution has no usable entries".to_string(),
            ));
        }

        let targets = known
            .into_iter()
            .map(|(k, v)| (k, v / total))
            .collect::<Vec<_>>();
        let emitted = targets.iter().map(|(k, _)| (k.clone(), 0)).collect();

        Ok(Self {
            targets,
            emitted,
            slot: 0,
        })
    }

    fn next(&mut self) -> &str {
        self.slot += 1;
        let mut best: Option<(usize, f64)> = None;
        for (idx, (key, fraction)) in self.targets.iter().enumerate() {
            let deficit = fraction * self.slot as f64 - self.emitted[key] as f64;
            // Strict > keeps ties on the first key in stable order, making
            // selection reproducible for a given count and distribution.
            if best.map(|(_, d)| deficit > d).unwrap_or(true) {
                best = Some((idx, deficit));
            }
        }
        let idx = best.expect("targets are non-empty").0;
        let key = &self.targets[idx].0;
        *self.emitted.get_mut(key).expect("key present") += 1;
        key
    }
}

// ─── Orchestrator ───────────────────────────────────────────────────────────

/// Drives N sequential generations for one request. Holds only shared
/// read-only collaborators, so independent batches can run concurrently.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    registry: Arc<TemplateRegistry>,
    pools: Arc<VariablePools>,
    config: EngineConfig,
    assembler: ContentAssembler,
    scorer: SeoScorer,
}

impl BatchOrchestrator {
    pub fn new(
        registry: Arc<TemplateRegistry>,
        pools: Arc<VariablePools>,
        config: EngineConfig,
    ) -> Self {
        let assembler = ContentAssembler::new(&config);
        let scorer = SeoScorer::new(&config);
        Self {
            registry,
            pools,
            config,
            assembler,
            scorer,
        }
    }

    /// Run one batch to completion (or cancellation), emitting a progress
    /// record through `progress` after every slot.
    ///
    /// Slot-level failures are recorded and the batch continues; the batch
    /// fails only when the failure ratio exceeds the configured maximum.
    pub fn run<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
        progress: &mut dyn FnMut(&ProgressRecord),
        cancel: Option<&CancellationFlag>,
    ) -> ArticleResult<BatchOutcome> {
        self.validate(request)?;

        let mut machine = BatchStateMachine::new();
        machine.transition(BatchState::Running)?;

        let pools = self.pools.merged(&request.variables);
        let generated_at = request.fixed_timestamp.unwrap_or_else(Utc::now);
        let year = generated_at.year();

        let mut selector = match &request.template {
            TemplateSelector::Pinned(_) => None,
            TemplateSelector::Distribution => Some(DeficitSelector::new(
                &self.config.template_distribution,
                &self.registry,
            )?),
        };

        let total = request.count;
        let mut result = BatchResult::default();
        let mut failures: Vec<SlotFailure> = Vec::new();
        let mut titles: HashSet<String> = HashSet::new();
        let mut duplicate_titles = 0usize;

        info!(total, template = ?request.template, "batch started");

        for slot in 0..total {
            if cancel.map(CancellationFlag::is_cancelled).unwrap_or(false) {
                info!(slot, "batch cancelled, retaining completed slots");
                break;
            }

            let template_type = match (&request.template, selector.as_mut()) {
                (TemplateSelector::Pinned(t), _) => t.clone(),
                (TemplateSelector::Distribution, Some(sel)) => sel.next().to_string(),
                (TemplateSelector::Distribution, None) => unreachable!("selector built above"),
            };

            let outcome = match self.generate_slot(
                &template_type,
                &pools,
                request,
                &titles,
                year,
                generated_at,
                rng,
            ) {
                Ok((article, was_duplicate)) => {
                    if was_duplicate {
                        duplicate_titles += 1;
                        warn!(slot, title = %article.title, "duplicate title accepted after retry budget");
                    }
                    titles.insert(article.title.clone());
                    *result
                        .distribution
                        .entry(article.template_type.clone())
                        .or_insert(0) += 1;
                    result.articles.push(article.clone());
                    SlotOutcome::Generated(Box::new(article))
                }
                Err(err) if err.is_slot_recoverable() => {
                    warn!(slot, template_type = %template_type, error = %err, "slot failed");
                    let failure = SlotFailure {
                        slot,
                        template_type: template_type.clone(),
                        error: err.to_string(),
                    };
                    failures.push(failure.clone());
                    SlotOutcome::Failed(failure)
                }
                Err(err) => return Err(err),
            };

            progress(&ProgressRecord {
                completed: slot + 1,
                total,
                outcome,
            });
        }

        let failed_count = failures.len();
        let failure_ratio = failed_count as f64 / total as f64;
        let status = if failure_ratio > self.config.max_failure_ratio {
            machine.transition(BatchState::Failed)?;
            BatchStatus::Failed
        } else if result.articles.len() < total {
            machine.transition(BatchState::Completed)?;
            BatchStatus::Partial
        } else {
            machine.transition(BatchState::Completed)?;
            BatchStatus::Completed
        };

        info!(
            ?status,
            generated = result.articles.len(),
            failed = failed_count,
            duplicate_titles,
            "batch finished"
        );

        Ok(BatchOutcome {
            status,
            result,
            failed_count,
            failures,
            duplicate_titles,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> ArticleResult<()> {
        if request.count == 0 {
            return Err(ArticleError::Validation(
                "count must be positive".to_string(),
            ));
        }
        if request.count > self.config.max_articles {
            return Err(ArticleError::Validation(format!(
                "count {} exceeds configured ceiling {}",
                request.count, self.config.max_articles
            )));
        }
        if let TemplateSelector::Pinned(template_type) = &request.template {
            // Unknown pinned type is fatal to the whole request.
            self.registry.get(template_type)?;
        }
        Ok(())
    }

    /// Generate one article, regenerating within the retry budget when the
    /// title collides with one already in the batch. Returns the article
    /// and whether it was accepted as a duplicate after exhaustion.
    #[allow(clippy::too_many_arguments)]
    fn generate_slot<R: Rng + ?Sized>(
        &self,
        template_type: &str,
        pools: &VariablePools,
        request: &GenerationRequest,
        titles: &HashSet<String>,
        year: i32,
        generated_at: chrono::DateTime<Utc>,
        rng: &mut R,
    ) -> ArticleResult<(article_core::types::GeneratedArticle, bool)> {
        let def = self.registry.get(template_type)?;

        let mut last_draft = None;
        for _ in 0..=self.config.slot_retries {
            let number = self.config.item_count_choices
                [rng.gen_range(0..self.config.item_count_choices.len())];
            let ctx = GenerationContext::draw(def, pools, rng, number, year)?;
            let draft = self.assembler.assemble(def, pools, &ctx, rng)?;
            if !titles.contains(&draft.title) {
                let id = Uuid::from_bytes(rng.gen());
                return Ok((
                    self.scorer
                        .annotate(draft, &request.thresholds, id, generated_at),
                    false,
                ));
            }
            last_draft = Some(draft);
        }

        // Retry budget exhausted; accept the duplicate but flag it.
        let draft = last_draft.expect("at least one attempt");
        let id = Uuid::from_bytes(rng.gen());
        Ok((
            self.scorer
                .annotate(draft, &request.thresholds, id, generated_at),
            true,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use article_core::rng;
    use article_core::types::SeoThresholds;
    use chrono::TimeZone;

    fn orchestrator() -> BatchOrchestrator {
        let pools = Arc::new(VariablePools::builtin());
        let registry = Arc::new(TemplateRegistry::builtin(&pools).unwrap());
        BatchOrchestrator::new(registry, pools, EngineConfig::default())
    }

    fn run(
        orchestrator: &BatchOrchestrator,
        request: &GenerationRequest,
        seed: u64,
    ) -> BatchOutcome {
        let mut rng = rng::seeded(seed);
        orchestrator
            .run(request, &mut rng, &mut |_| {}, None)
            .unwrap()
    }

    fn fixed_request(mut request: GenerationRequest) -> GenerationRequest {
        request.fixed_timestamp = Some(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap());
        request
    }

    #[test]
    fn test_pinned_template_type_everywhere() {
        let orch = orchestrator();
        let outcome = run(&orch, &GenerationRequest::pinned("how_to", 8), 5);

        assert_eq!(outcome.status, BatchStatus::Completed);
        assert_eq!(outcome.result.articles.len(), 8);
        for article in &outcome.result.articles {
            assert_eq!(article.template_type, "how_to");
        }
        assert_eq!(outcome.result.distribution["how_to"], 8);
    }

    #[test]
    fn test_unknown_pinned_type_is_fatal() {
        let orch = orchestrator();
        let mut rng = rng::seeded(1);
        let err = orch
            .run(
                &GenerationRequest::pinned("press_release", 3),
                &mut rng,
                &mut |_| {},
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ArticleError::UnknownTemplate(_)));
    }

    #[test]
    fn test_count_ceiling_enforced() {
        let orch = orchestrator();
        let mut rng = rng::seeded(1);
        let err = orch
            .run(
                &GenerationRequest::distributed(501),
                &mut rng,
                &mut |_| {},
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ArticleError::Validation(_)));
    }

    #[test]
    fn test_distribution_prefix_deviation_at_most_one() {
        let orch = orchestrator();
        let total = 40;
        let mut prefix_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut rng = rng::seeded(77);
        let mut k = 0usize;

        let request = GenerationRequest::distributed(total);
        let distribution = EngineConfig::default().template_distribution;

        orch.run(
            &request,
            &mut rng,
            &mut |record| {
                if let SlotOutcome::Generated(article) = &record.outcome {
                    *prefix_counts
                        .entry(article.template_type.clone())
                        .or_insert(0) += 1;
                }
                k += 1;
                for (template_type, fraction) in &distribution {
                    let realized = *prefix_counts.get(template_type).unwrap_or(&0) as f64;
                    let target = fraction * k as f64;
                    assert!(
                        (realized - target.round()).abs() <= 1.0,
                        "prefix {k}: {template_type} realized {realized}, target {target}"
                    );
                }
            },
            None,
        )
        .unwrap();
        assert_eq!(k, total);
    }

    #[test]
    fn test_titles_unique_or_flagged() {
        let orch = orchestrator();
        let outcome = run(&orch, &GenerationRequest::distributed(25), 13);

        let mut titles: Vec<&str> = outcome
            .result
            .articles
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        let total = titles.len();
        titles.sort();
        titles.dedup();
        assert_eq!(
            total - titles.len(),
            outcome.duplicate_titles,
            "every duplicate must be flagged"
        );
    }

    #[test]
    fn test_seeded_runs_are_byte_identical() {
        let orch = orchestrator();
        let request = fixed_request(GenerationRequest::distributed(12));

        let a = run(&orch, &request, 99);
        let b = run(&orch, &request, 99);

        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.result).unwrap(),
            serde_json::to_string(&b.result).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let orch = orchestrator();
        let request = fixed_request(GenerationRequest::distributed(6));
        let a = run(&orch, &request, 1);
        let b = run(&orch, &request, 2);
        assert_ne!(a.result, b.result);
    }

    #[test]
    fn test_widgetpro_scenario() {
        let orch = orchestrator();
        let mut request = GenerationRequest::pinned("listicle", 1);
        request.variables.insert(
            "products".to_string(),
            vec!["WidgetPro".to_string()],
        );
        request.thresholds = SeoThresholds {
            min_word_count: 100,
            max_word_count: 2500,
            target_density: 0.02,
        };

        let outcome = run(&orch, &request, 3);
        assert_eq!(outcome.result.articles.len(), 1);
        let article = &outcome.result.articles[0];
        assert!(article.title.contains("WidgetPro"));
        assert!(article.word_count >= 1);
        assert!(article.seo_score <= 100);
    }

    #[test]
    fn test_empty_required_pool_never_completes() {
        let orch = orchestrator();
        let mut request = GenerationRequest::pinned("listicle", 5);
        request
            .variables
            .insert("products".to_string(), Vec::new());

        let mut records = 0usize;
        let mut rng = rng::seeded(8);
        let outcome = orch
            .run(&request, &mut rng, &mut |_| records += 1, None)
            .unwrap();

        // Every slot fails: 100% failure ratio exceeds the 20% maximum.
        assert_eq!(outcome.status, BatchStatus::Failed);
        assert_eq!(outcome.failed_count, 5);
        assert!(outcome.result.articles.is_empty());
        assert_eq!(records, 5, "progress is reported for failed slots too");
    }

    #[test]
    fn test_cancellation_between_slots_retains_partial() {
        let orch = orchestrator();
        let request = GenerationRequest::pinned("listicle", 10);
        let cancel = CancellationFlag::new();

        let cancel_inner = cancel.clone();
        let mut rng = rng::seeded(44);
        let outcome = orch
            .run(
                &request,
                &mut rng,
                &mut |record| {
                    if record.completed == 3 {
                        cancel_inner.cancel();
                    }
                },
                Some(&cancel),
            )
            .unwrap();

        assert_eq!(outcome.result.articles.len(), 3);
        assert_eq!(outcome.status, BatchStatus::Partial);
    }

    #[test]
    fn test_state_machine_guards_transitions() {
        let mut machine = BatchStateMachine::new();
        assert!(machine.transition(BatchState::Completed).is_err());
        machine.transition(BatchState::Running).unwrap();
        machine.transition(BatchState::Completed).unwrap();
        assert!(machine.transition(BatchState::Failed).is_err());
    }

    #[test]
    fn test_progress_terminal_record_counts() {
        let orch = orchestrator();
        let mut last: Option<ProgressRecord> = None;
        let mut rng = rng::seeded(2);
        let outcome = orch
            .run(
                &GenerationRequest::pinned("comparison", 4),
                &mut rng,
                &mut |record| last = Some(record.clone()),
                None,
            )
            .unwrap();

        let last = last.unwrap();
        assert_eq!(last.completed, 4);
        assert_eq!(last.total, 4);
        assert_eq!(outcome.failed_count, 0);
    }
}
