//! Article generation engine — template selection, placeholder resolution,
//! content assembly, SEO scoring, and uniqueness-preserving batch
//! orchestration.

pub mod assembler;
pub mod batch;
pub mod pools;
pub mod registry;
pub mod resolver;
pub mod scorer;

pub use assembler::{ArticleDraft, Attempt, ContentAssembler};
pub use batch::{BatchOrchestrator, BatchState, BatchStateMachine, CancellationFlag};
pub use pools::VariablePools;
pub use registry::{TemplateDefinition, TemplateRegistry};
pub use scorer::SeoScorer;
