//! Article Express CLI — batch-generate SEO articles from templates and
//! write them out as JSON, Markdown, or HTML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use article_core::types::{GeneratedArticle, GenerationRequest, SlotOutcome};
use article_core::{rng, EngineConfig};
use article_engine::{BatchOrchestrator, TemplateRegistry, VariablePools};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "article-express")]
#[command(about = "Template-driven SEO article generation engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of articles and write them to disk
    Generate {
        /// Number of articles to generate
        #[arg(short, long, default_value = "10", env = "ARTICLE_EXPRESS__COUNT")]
        count: usize,

        /// Pin every article to one template type (default: configured distribution)
        #[arg(short, long)]
        template: Option<String>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = "output", env = "ARTICLE_EXPRESS__OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Path to a JSON file of variable pool overrides
        #[arg(long)]
        variables: Option<PathBuf>,

        /// Minimum acceptable word count
        #[arg(long)]
        min_words: Option<usize>,

        /// Maximum acceptable word count
        #[arg(long)]
        max_words: Option<usize>,

        /// Target keyword density (fraction of words)
        #[arg(long)]
        density: Option<f64>,
    },

    /// List all registered template types
    ListTemplates,

    /// List the built-in variable pools and their sizes
    ListPools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
    Html,
    All,
}

impl OutputFormat {
    fn labels(self) -> Vec<&'static str> {
        match self {
            OutputFormat::Json => vec!["json"],
            OutputFormat::Markdown => vec!["markdown"],
            OutputFormat::Html => vec!["html"],
            OutputFormat::All => vec!["json", "markdown", "html"],
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_express=info,article_engine=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            count,
            template,
            seed,
            output_dir,
            format,
            variables,
            min_words,
            max_words,
            density,
        } => cmd_generate(
            count, template, seed, output_dir, format, variables, min_words, max_words, density,
        ),
        Commands::ListTemplates => cmd_list_templates(),
        Commands::ListPools => cmd_list_pools(),
    }
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    count: usize,
    template: Option<String>,
    seed: Option<u64>,
    output_dir: PathBuf,
    format: OutputFormat,
    variables: Option<PathBuf>,
    min_words: Option<usize>,
    max_words: Option<usize>,
    density: Option<f64>,
) -> anyhow::Result<()> {
    let config = EngineConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        EngineConfig::default()
    });

    let pools = Arc::new(VariablePools::builtin());
    let registry = Arc::new(TemplateRegistry::builtin(&pools)?);
    let orchestrator = BatchOrchestrator::new(registry, pools, config);

    let mut request = match template {
        Some(t) => GenerationRequest::pinned(t, count),
        None => GenerationRequest::distributed(count),
    };
    request.formats = format.labels().iter().map(|s| s.to_string()).collect();
    if let Some(path) = variables {
        request.variables = load_variables(&path)?;
    }
    if let Some(min) = min_words {
        request.thresholds.min_word_count = min;
    }
    if let Some(max) = max_words {
        request.thresholds.max_word_count = max;
    }
    if let Some(d) = density {
        request.thresholds.target_density = d;
    }

    let mut rng = match seed {
        Some(s) => {
            info!(seed = s, "using seeded rng");
            rng::seeded(s)
        }
        None => rng::system(),
    };

    let mut progress = |record: &article_core::types::ProgressRecord| match &record.outcome {
        SlotOutcome::Generated(article) => {
            debug!(
                completed = record.completed,
                total = record.total,
                title = %article.title,
                seo_score = article.seo_score,
                "article generated"
            );
        }
        SlotOutcome::Failed(failure) => {
            warn!(
                completed = record.completed,
                total = record.total,
                slot = failure.slot,
                error = %failure.error,
                "slot failed"
            );
        }
    };

    let outcome = orchestrator.run(&request, &mut rng, &mut progress, None)?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    for (index, article) in outcome.result.articles.iter().enumerate() {
        write_article(&output_dir, index, article, format)?;
    }

    let manifest = article_formats::outcome_to_json(&outcome)?;
    let manifest_path = output_dir.join("manifest.json");
    std::fs::write(&manifest_path, manifest)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    print_summary(&outcome, &output_dir);
    Ok(())
}

fn load_variables(path: &Path) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading variables file {}", path.display()))?;
    let overrides: BTreeMap<String, Vec<String>> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing variables file {}", path.display()))?;
    Ok(overrides)
}

fn write_article(
    output_dir: &Path,
    index: usize,
    article: &GeneratedArticle,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let slug = article_formats::slugify(&article.title);
    let stem = if slug.is_empty() {
        format!("{:03}-article", index + 1)
    } else {
        format!("{:03}-{slug}", index + 1)
    };

    for label in format.labels() {
        let (extension, body) = match label {
            "json" => ("json", article_formats::to_json(article)?),
            "markdown" => ("md", article_formats::to_markdown(article)),
            "html" => ("html", article_formats::to_html(article)),
            _ => unreachable!("labels() yields known formats"),
        };
        let path = output_dir.join(format!("{stem}.{extension}"));
        std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn print_summary(outcome: &article_core::types::BatchOutcome, output_dir: &Path) {
    let articles = &outcome.result.articles;

    println!("=== Generation Summary ===");
    println!();
    println!("  Status:           {:?}", outcome.status);
    println!("  Articles written: {}", articles.len());
    println!("  Failed slots:     {}", outcome.failed_count);
    println!("  Duplicate titles: {}", outcome.duplicate_titles);
    println!("  Output directory: {}", output_dir.display());

    if !outcome.result.distribution.is_empty() {
        println!();
        println!("  Template distribution:");
        for (template_type, n) in &outcome.result.distribution {
            println!("    {template_type:<20} {n}");
        }
    }

    if !articles.is_empty() {
        let avg_score: f64 =
            articles.iter().map(|a| a.seo_score as f64).sum::<f64>() / articles.len() as f64;
        let avg_words: f64 =
            articles.iter().map(|a| a.word_count as f64).sum::<f64>() / articles.len() as f64;
        println!();
        println!("  Avg SEO score:    {avg_score:.1}/100");
        println!("  Avg word count:   {avg_words:.0}");
        println!();
        println!("  Sample titles:");
        for article in articles.iter().take(5) {
            println!("    - {}", article.title);
        }
    }

    if !outcome.failures.is_empty() {
        println!();
        println!("  Failures:");
        for failure in &outcome.failures {
            println!(
                "    slot {} ({}): {}",
                failure.slot, failure.template_type, failure.error
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

fn cmd_list_templates() -> anyhow::Result<()> {
    let pools = VariablePools::builtin();
    let registry = TemplateRegistry::builtin(&pools)?;

    println!("Registered template types:");
    println!();
    for template_type in registry.types() {
        let def = registry.get(template_type)?;
        println!(
            "  {:<20} {} title patterns, primary token '{}'",
            template_type,
            def.title_patterns.len(),
            def.primary_token
        );
    }
    Ok(())
}

fn cmd_list_pools() -> anyhow::Result<()> {
    let pools = VariablePools::builtin();

    println!("Built-in variable pools:");
    println!();
    for name in pools.names() {
        let values = pools.resolve(name)?;
        let preview: Vec<&str> = values.iter().take(3).map(String::as_str).collect();
        println!("  {:<20} {:>3} values  e.g. {}", name, values.len(), preview.join(", "));
    }
    Ok(())
}
