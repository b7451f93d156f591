//! Catalog of template-type definitions. Built once at startup, validated
//! fail-fast, and shared read-only with every batch.

use std::collections::BTreeMap;

use tracing::info;

use article_core::{ArticleError, ArticleResult};

use crate::pools::VariablePools;
use crate::resolver;

/// Binds a pattern token to the variable pool it draws from.
#[derive(Debug, Clone)]
pub struct TokenBinding {
    pub token: String,
    pub pool: String,
}

impl TokenBinding {
    fn new(token: &str, pool: &str) -> Self {
        Self {
            token: token.to_string(),
            pool: pool.to_string(),
        }
    }
}

/// Per-family section blueprint. Parameterizes how the assembler turns a
/// resolved context into ordered content sections.
#[derive(Debug, Clone)]
pub enum SectionBlueprint {
    /// `number` independent list items, each with a benefit list.
    Listicle {
        item_title_patterns: Vec<String>,
        item_body_patterns: Vec<String>,
        benefit_patterns: Vec<String>,
    },
    /// Prerequisites, one ordered step sequence, then pro tips.
    HowTo {
        prerequisites: Vec<String>,
        step_title_patterns: Vec<String>,
        step_body_patterns: Vec<String>,
        tip_patterns: Vec<String>,
    },
    /// A feature table over fixed attributes plus an analysis group.
    Comparison {
        attributes: Vec<String>,
        cell_patterns: Vec<String>,
        analysis_title_patterns: Vec<String>,
        analysis_body_patterns: Vec<String>,
    },
    /// `number` titled subsections plus a closing resource list.
    Guide {
        subsection_title_patterns: Vec<String>,
        subsection_body_patterns: Vec<String>,
        resources: Vec<(String, String)>,
    },
}

impl SectionBlueprint {
    fn patterns(&self) -> Vec<&str> {
        match self {
            SectionBlueprint::Listicle {
                item_title_patterns,
                item_body_patterns,
                benefit_patterns,
            } => item_title_patterns
                .iter()
                .chain(item_body_patterns)
                .chain(benefit_patterns)
                .map(String::as_str)
                .collect(),
            SectionBlueprint::HowTo {
                prerequisites,
                step_title_patterns,
                step_body_patterns,
                tip_patterns,
            } => prerequisites
                .iter()
                .chain(step_title_patterns)
                .chain(step_body_patterns)
                .chain(tip_patterns)
                .map(String::as_str)
                .collect(),
            SectionBlueprint::Comparison {
                attributes,
                cell_patterns,
                analysis_title_patterns,
                analysis_body_patterns,
            } => attributes
                .iter()
                .chain(cell_patterns)
                .chain(analysis_title_patterns)
                .chain(analysis_body_patterns)
                .map(String::as_str)
                .collect(),
            SectionBlueprint::Guide {
                subsection_title_patterns,
                subsection_body_patterns,
                resources,
            } => subsection_title_patterns
                .iter()
                .chain(subsection_body_patterns)
                .map(String::as_str)
                .chain(resources.iter().map(|(_, desc)| desc.as_str()))
                .collect(),
        }
    }

    /// First pattern list the assembler draws from that is empty, if any.
    /// These lists feed random selection and must never be empty; lists the
    /// assembler only iterates (prerequisites, tips, attributes, analysis
    /// pairs, resources) may be.
    fn empty_drawn_list(&self) -> Option<&'static str> {
        fn first_empty(lists: &[(&'static str, &[String])]) -> Option<&'static str> {
            lists
                .iter()
                .find(|(_, list)| list.is_empty())
                .map(|(name, _)| *name)
        }

        match self {
            SectionBlueprint::Listicle {
                item_title_patterns,
                item_body_patterns,
                ..
            } => first_empty(&[
                ("item_title_patterns", item_title_patterns),
                ("item_body_patterns", item_body_patterns),
            ]),
            SectionBlueprint::HowTo {
                step_title_patterns,
                step_body_patterns,
                ..
            } => first_empty(&[
                ("step_title_patterns", step_title_patterns),
                ("step_body_patterns", step_body_patterns),
            ]),
            SectionBlueprint::Comparison { cell_patterns, .. } => {
                first_empty(&[("cell_patterns", cell_patterns)])
            }
            SectionBlueprint::Guide {
                subsection_title_patterns,
                subsection_body_patterns,
                ..
            } => first_empty(&[
                ("subsection_title_patterns", subsection_title_patterns),
                ("subsection_body_patterns", subsection_body_patterns),
            ]),
        }
    }
}

/// A complete template-type definition. Immutable after registry
/// construction.
#[derive(Debug, Clone)]
pub struct TemplateDefinition {
    pub template_type: String,
    pub title_patterns: Vec<String>,
    pub intro_patterns: Vec<String>,
    pub blueprint: SectionBlueprint,
    pub conclusion_patterns: Vec<String>,
    pub takeaway_patterns: Vec<String>,
    pub required_tokens: Vec<TokenBinding>,
    /// The token whose resolved value is the article's primary SEO keyword.
    pub primary_token: String,
}

impl TemplateDefinition {
    fn all_patterns(&self) -> Vec<&str> {
        self.title_patterns
            .iter()
            .chain(&self.intro_patterns)
            .chain(&self.conclusion_patterns)
            .chain(&self.takeaway_patterns)
            .map(String::as_str)
            .chain(self.blueprint.patterns())
            .collect()
    }
}

/// Immutable registry of template definitions, shared by reference into
/// the engine.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    /// Build a registry from explicit definitions, validating each against
    /// the default pools. Fails fast with `InvalidTemplate` on the first
    /// pattern token that is neither bound nor derived, or the first bound
    /// pool missing from `pools`.
    pub fn from_definitions(
        definitions: Vec<TemplateDefinition>,
        pools: &VariablePools,
    ) -> ArticleResult<Self> {
        let mut templates = BTreeMap::new();

        for def in definitions {
            validate_definition(&def, pools)?;
            info!(template_type = %def.template_type, "registered template definition");
            templates.insert(def.template_type.clone(), def);
        }

        Ok(Self { templates })
    }

    /// The built-in catalog.
    pub fn builtin(pools: &VariablePools) -> ArticleResult<Self> {
        Self::from_definitions(builtin_definitions(), pools)
    }

    pub fn get(&self, template_type: &str) -> ArticleResult<&TemplateDefinition> {
        self.templates
            .get(template_type)
            .ok_or_else(|| ArticleError::UnknownTemplate(template_type.to_string()))
    }

    /// Registered template-type keys, in stable order.
    pub fn types(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn validate_definition(def: &TemplateDefinition, pools: &VariablePools) -> ArticleResult<()> {
    if def.title_patterns.is_empty() || def.intro_patterns.is_empty() {
        return Err(ArticleError::InvalidTemplate {
            template_type: def.template_type.clone(),
            reason: "title and intro pattern lists must be non-empty".to_string(),
        });
    }

    if def.conclusion_patterns.is_empty() || def.takeaway_patterns.is_empty() {
        return Err(ArticleError::InvalidTemplate {
            template_type: def.template_type.clone(),
            reason: "conclusion and takeaway pattern lists must be non-empty".to_string(),
        });
    }

    // Every list the assembler draws from at random must be non-empty, or
    // generation would fault long after construction succeeded.
    if let Some(list) = def.blueprint.empty_drawn_list() {
        return Err(ArticleError::InvalidTemplate {
            template_type: def.template_type.clone(),
            reason: format!("blueprint pattern list '{list}' must be non-empty"),
        });
    }

    if !def
        .required_tokens
        .iter()
        .any(|b| b.token == def.primary_token)
    {
        return Err(ArticleError::InvalidTemplate {
            template_type: def.template_type.clone(),
            reason: format!("primary token '{}' is not bound", def.primary_token),
        });
    }

    for binding in &def.required_tokens {
        if !pools.contains(&binding.pool) {
            return Err(ArticleError::InvalidTemplate {
                template_type: def.template_type.clone(),
                reason: format!(
                    "token '{}' is bound to missing or empty pool '{}'",
                    binding.token, binding.pool
                ),
            });
        }
    }

    for pattern in def.all_patterns() {
        for token in resolver::tokens(pattern) {
            let bound = def.required_tokens.iter().any(|b| b.token == token);
            if !bound && !resolver::is_derived(&token) {
                return Err(ArticleError::InvalidTemplate {
                    template_type: def.template_type.clone(),
                    reason: format!("pattern references undeclared token '{token}'"),
                });
            }
        }
    }

    Ok(())
}

// ─── Built-in catalog ───────────────────────────────────────────────────────

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn builtin_definitions() -> Vec<TemplateDefinition> {
    vec![
        listicle(),
        how_to(),
        comparison(),
        ultimate_guide(),
        location_based(),
        crypto_focused(),
        developer_focused(),
    ]
}

fn listicle() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "listicle".to_string(),
        title_patterns: strings(&[
            "{number} Reasons {audience} Choose {product} in {year}",
            "{number} Ways {product} Helps You {goal}",
            "Top {number} Benefits of {product} for {use_case}",
            "{number} Things Nobody Tells You About {product}",
        ]),
        intro_patterns: strings(&[
            "If you care about {use_case}, {product} deserves a close look. \
             Here are {number} reasons it stands out for {audience} in {year}.",
            "Choosing the right tool for {use_case} is harder than it should be. \
             This list breaks down {number} ways {product} helps you {goal}.",
        ]),
        blueprint: SectionBlueprint::Listicle {
            item_title_patterns: strings(&[
                "Built for {use_case}",
                "No Account, No Trace",
                "Works Anywhere {audience} Do",
                "Pricing That Matches Real Usage",
                "Encryption On by Default",
                "Nothing to Install",
                "Designed Around {goal}",
                "Trusted by {audience}",
                "Instant Setup in Seconds",
                "Your Number Stays Yours",
            ]),
            item_body_patterns: strings(&[
                "{product} approaches {use_case} without asking for personal details, \
                 which keeps you in control from the first call.",
                "Where other tools demand accounts and apps, {product} runs entirely \
                 in the browser, so there is nothing to leak.",
                "For {audience}, this alone often justifies the switch: {product} \
                 removes the friction without removing the security.",
                "Every session is isolated, so using {product} repeatedly never \
                 builds up a profile you have to worry about.",
                "It is a small detail with a big payoff when your goal is to {goal}.",
                "In practice this means {audience} can rely on {product} for \
                 {use_case} without changing how they already work.",
            ]),
            benefit_patterns: strings(&[
                "Helps you {goal}",
                "No downloads or installs",
                "Ready for {use_case}",
                "Works for {audience} out of the box",
                "Keeps your identity private",
            ]),
        },
        conclusion_patterns: strings(&[
            "With these {number} reasons on the table, it's clear why {product} keeps \
             winning over {audience} who care about {use_case}.",
            "If even a few of these points match your situation, {product} is worth \
             trying for {use_case} today.",
        ]),
        takeaway_patterns: strings(&[
            "{product} requires no downloads or installations",
            "Pay-per-use pricing keeps costs predictable",
            "{product} is built around {use_case}",
            "Works on any device with a modern browser",
            "{audience} can start in under a minute",
            "Helps you {goal} without new hardware",
        ]),
        required_tokens: vec![
            TokenBinding::new("product", "products"),
            TokenBinding::new("audience", "audiences"),
            TokenBinding::new("use_case", "use_cases"),
            TokenBinding::new("goal", "goals"),
        ],
        primary_token: "product".to_string(),
    }
}

fn how_to() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "how_to".to_string(),
        title_patterns: strings(&[
            "How to {action} with {product} ({year} Guide)",
            "How to {action} in {number} Simple Steps",
            "The Fastest Way to {action} Using {product}",
        ]),
        intro_patterns: strings(&[
            "Learning to {action} takes minutes, not hours. This guide walks \
             through the whole process with {product}, step by step.",
            "If you want to {goal}, knowing how to {action} is essential. \
             Here is the complete walkthrough for {year}.",
        ]),
        blueprint: SectionBlueprint::HowTo {
            prerequisites: strings(&[
                "A modern web browser (Chrome, Firefox, Safari, or Edge)",
                "A stable internet connection",
                "Microphone access (your browser will ask)",
                "Five minutes of your time",
            ]),
            step_title_patterns: strings(&[
                "Open {product}",
                "Create Your Private Room",
                "Share the Secure Link",
                "Confirm Your Settings",
                "Start the Conversation",
                "Review the Session",
                "Close Out Cleanly",
                "Verify It Worked",
            ]),
            step_body_patterns: strings(&[
                "Navigate to {product} in any modern browser; there is nothing \
                 to download or register.",
                "One click generates a unique, encrypted room that exists only \
                 for this session.",
                "Send the link through whatever channel you already trust; the \
                 room stays locked to its participants.",
                "Double-check microphone permissions so you can {action} without \
                 interruptions.",
                "Both parties join and the encrypted conversation begins \
                 immediately.",
                "When you are done, the session leaves nothing behind, which is \
                 exactly what you want when you {goal}.",
            ]),
            tip_patterns: strings(&[
                "Use headphones for better audio quality",
                "Test your microphone before important calls",
                "Close unused browser tabs for smoother performance",
                "Prefer a wired connection for critical conversations",
            ]),
        },
        conclusion_patterns: strings(&[
            "That's all it takes to {action}. With {product}, the secure path is \
             also the easy one.",
            "Follow these steps once and you'll never go back to the complicated \
             way of trying to {goal}.",
        ]),
        takeaway_patterns: strings(&[
            "You can {action} without installing anything",
            "{product} generates a fresh encrypted room per session",
            "Setup takes under five minutes end to end",
            "No account is required at any step",
            "Each session is isolated and leaves no history",
        ]),
        required_tokens: vec![
            TokenBinding::new("product", "products"),
            TokenBinding::new("action", "actions"),
            TokenBinding::new("goal", "goals"),
        ],
        primary_token: "product".to_string(),
    }
}

fn comparison() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "comparison".to_string(),
        title_patterns: strings(&[
            "{product} vs {competitor}: Which Wins in {year}?",
            "{product} or {competitor}? An Honest Comparison",
            "{product} vs {competitor} for {use_case}",
        ]),
        intro_patterns: strings(&[
            "{product} and {competitor} both promise a lot. We compared them \
             head to head for {use_case} so you don't have to.",
            "Picking between {product} and {competitor} comes down to what you \
             value. Here is how they stack up in {year}.",
        ]),
        blueprint: SectionBlueprint::Comparison {
            attributes: strings(&[
                "Privacy Protection",
                "Browser-Based",
                "No Download Required",
                "Pay-Per-Use",
                "Anonymous Usage",
            ]),
            cell_patterns: strings(&[
                "Complete",
                "Partial",
                "Yes",
                "No",
                "Requires Account",
                "Monthly Only",
            ]),
            analysis_title_patterns: strings(&[
                "Privacy Features",
                "Ease of Use",
                "Pricing Model",
                "Where {competitor} Still Leads",
            ]),
            analysis_body_patterns: strings(&[
                "When it comes to privacy, the gap is clear: {product} treats \
                 {use_case} as the default, not an add-on.",
                "User experience decides adoption, and {product} wins by asking \
                 less of you than {competitor} does.",
                "The pricing structures reveal different philosophies; only one \
                 of them assumes you want a subscription.",
                "{competitor} has the larger install base, which matters if the \
                 people you call refuse to open a browser tab.",
            ]),
        },
        conclusion_patterns: strings(&[
            "Both have their merits, but {product} stands out for anyone who \
             prioritizes {use_case}.",
            "If {use_case} is your deciding factor, {product} is the safer bet \
             over {competitor} this year.",
        ]),
        takeaway_patterns: strings(&[
            "{product} works without an account; {competitor} does not",
            "Only {product} offers pay-per-use pricing",
            "{competitor} requires an installed app for full features",
            "{product} keeps {use_case} as its core design goal",
            "Switching costs are near zero with {product}",
        ]),
        required_tokens: vec![
            TokenBinding::new("product", "products"),
            TokenBinding::new("competitor", "competitors"),
            TokenBinding::new("use_case", "use_cases"),
        ],
        primary_token: "product".to_string(),
    }
}

fn ultimate_guide() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "ultimate_guide".to_string(),
        title_patterns: strings(&[
            "The Ultimate Guide to {topic} ({year} Edition)",
            "{topic}: The Complete Guide for {audience}",
            "Everything You Need to Know About {topic}",
        ]),
        intro_patterns: strings(&[
            "This comprehensive guide covers everything about {topic}, from the \
             basics to the techniques {audience} actually use in {year}.",
            "Whether you are new to {topic} or refining your setup, this guide \
             collects what matters and skips what doesn't.",
        ]),
        blueprint: SectionBlueprint::Guide {
            subsection_title_patterns: strings(&[
                "Getting Started with {topic}",
                "Core Concepts",
                "Common Mistakes to Avoid",
                "Advanced Techniques",
                "Best Practices for {audience}",
                "Security Considerations",
                "Performance and Reliability",
                "Where {topic} Goes Next",
            ]),
            subsection_body_patterns: strings(&[
                "The fundamentals of {topic} are simpler than they look: start \
                 small, verify each step, and build from there.",
                "Once the basics click, {audience} tend to over-complicate \
                 things; resist that and keep the setup minimal.",
                "Industry practice has converged on a few patterns for {topic}, \
                 and following them saves real time.",
                "Most failures trace back to skipped basics rather than exotic \
                 problems, so revisit this section when something breaks.",
                "Treat this as a checklist: each point here has bitten someone \
                 who assumed it didn't apply to them.",
            ]),
            resources: vec![
                (
                    "Documentation".to_string(),
                    "Complete reference documentation".to_string(),
                ),
                (
                    "Tutorial".to_string(),
                    "Step-by-step video walkthroughs".to_string(),
                ),
                (
                    "Community".to_string(),
                    "An active user community for questions".to_string(),
                ),
                (
                    "Support".to_string(),
                    "Responsive support when you get stuck".to_string(),
                ),
            ],
        },
        conclusion_patterns: strings(&[
            "The future of {topic} is already here, and it's more accessible \
             than ever for {audience}.",
            "Master these sections and you'll know more about {topic} than most \
             people writing about it.",
        ]),
        takeaway_patterns: strings(&[
            "{topic} rewards starting simple and iterating",
            "Most {topic} failures come from skipped fundamentals",
            "{audience} benefit most from minimal, verified setups",
            "Security defaults matter more than advanced features",
            "Revisit the basics whenever something breaks",
        ]),
        required_tokens: vec![
            TokenBinding::new("topic", "topics"),
            TokenBinding::new("audience", "audiences"),
        ],
        primary_token: "topic".to_string(),
    }
}

fn location_based() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "location_based".to_string(),
        title_patterns: strings(&[
            "{service} in {location}: The {year} Guide",
            "Best Options for {service} in {location}",
            "How {location} Residents Get {service}",
        ]),
        intro_patterns: strings(&[
            "Looking for {service} in {location}? Here is what actually works \
             in {year}, and what to avoid.",
            "{location} has no shortage of options for {service}; this guide \
             sorts the practical from the hype.",
        ]),
        // Guide-shaped: {location} is drawn once per article and stays
        // constant across every section.
        blueprint: SectionBlueprint::Guide {
            subsection_title_patterns: strings(&[
                "Why {location} Is Different",
                "Getting Started in {location}",
                "Local Rules and Practicalities",
                "What {location} Users Recommend",
                "Costs in {location}",
                "Staying Private in {location}",
            ]),
            subsection_body_patterns: strings(&[
                "Availability of {service} varies by region, and {location} has \
                 its own quirks worth knowing before you commit.",
                "Most providers in {location} assume an account-first model; \
                 {product} is the notable exception.",
                "Users in {location} report that browser-based options remove \
                 the usual setup friction entirely.",
                "Local pricing for {service} ranges widely, so pay-per-use is \
                 often the cheapest way to start in {location}.",
                "Whatever you pick, verify encryption defaults; not every \
                 {service} provider treats {location} traffic the same way.",
            ]),
            resources: vec![
                (
                    "Local Guide".to_string(),
                    "Region-specific setup notes".to_string(),
                ),
                (
                    "Pricing".to_string(),
                    "Current local pricing overview".to_string(),
                ),
                (
                    "Support".to_string(),
                    "Support channels in your timezone".to_string(),
                ),
            ],
        },
        conclusion_patterns: strings(&[
            "For {service} in {location}, the browser-based route via {product} \
             is the one most people end up on.",
            "{location} makes some things harder, but getting {service} is no \
             longer one of them.",
        ]),
        takeaway_patterns: strings(&[
            "{service} is fully available in {location}",
            "{product} works in {location} without local setup",
            "Pay-per-use beats subscriptions for occasional {service}",
            "Browser-based options avoid {location}-specific app stores",
            "Encryption defaults vary by provider; check before use",
        ]),
        required_tokens: vec![
            TokenBinding::new("location", "locations"),
            TokenBinding::new("service", "services"),
            TokenBinding::new("product", "products"),
        ],
        primary_token: "service".to_string(),
    }
}

fn crypto_focused() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "crypto_focused".to_string(),
        title_patterns: strings(&[
            "{number} Reasons to Pay for {product} with {crypto}",
            "Why {crypto} Users Choose {product} in {year}",
            "Top {number} Privacy Wins When You Combine {crypto} and {product}",
        ]),
        intro_patterns: strings(&[
            "Paying with {crypto} already keeps your finances private; pairing \
             it with {product} extends that to your calls. Here are {number} \
             reasons the combination works.",
            "For anyone avoiding {problem}, {crypto} plus {product} is a \
             natural fit. This list covers {number} reasons why.",
        ]),
        blueprint: SectionBlueprint::Listicle {
            item_title_patterns: strings(&[
                "No Payment Trail",
                "Funded in Seconds with {crypto}",
                "No Bank, No {problem}",
                "Consistent Privacy End to End",
                "Micro-Payments That Make Sense",
                "Borderless by Default",
                "Refund-Free Simplicity",
                "{crypto} Native, Not Bolted On",
            ]),
            item_body_patterns: strings(&[
                "Settling with {crypto} means no card statement ever links you \
                 to {product}.",
                "Top-ups confirm in moments, so {product} credit is there when \
                 you need the call, not after.",
                "Traditional billing reintroduces {problem}; {crypto} payments \
                 sidestep it entirely.",
                "Your communication privacy shouldn't end at the payment form, \
                 and with {crypto} it doesn't.",
                "Pay-per-use pricing and {crypto} micro-transactions are a \
                 natural match for {product}.",
            ]),
            benefit_patterns: strings(&[
                "No card details stored anywhere",
                "Works with {crypto} wallets you already have",
                "Avoids {problem} completely",
                "Instant, final settlement",
            ]),
        },
        conclusion_patterns: strings(&[
            "If you already hold {crypto}, there is no reason to let {problem} \
             back in through your phone bill; {product} closes that gap.",
            "Private money deserves private calls; {crypto} and {product} \
             deliver both.",
        ]),
        takeaway_patterns: strings(&[
            "{product} accepts {crypto} natively",
            "Payments confirm in seconds, not days",
            "No card or bank details are ever collected",
            "{crypto} micro-payments fit pay-per-use calling",
            "Payment privacy and call privacy finally match",
        ]),
        required_tokens: vec![
            TokenBinding::new("product", "products"),
            TokenBinding::new("crypto", "cryptocurrencies"),
            TokenBinding::new("problem", "problems"),
        ],
        primary_token: "product".to_string(),
    }
}

fn developer_focused() -> TemplateDefinition {
    TemplateDefinition {
        template_type: "developer_focused".to_string(),
        title_patterns: strings(&[
            "How to Integrate {product} into Your {language} Stack",
            "A {language} Developer's Guide to {product} ({year})",
            "How to {action} Programmatically with {product}",
        ]),
        intro_patterns: strings(&[
            "Integrating {product} from {language} takes an afternoon, not a \
             sprint. This walkthrough covers the whole path.",
            "If your {language} service needs to {action}, {product} exposes \
             the shortest route. Here is the step-by-step version.",
        ]),
        blueprint: SectionBlueprint::HowTo {
            prerequisites: strings(&[
                "A working {language} toolchain",
                "An HTTPS-capable HTTP client",
                "A test device with a microphone",
                "Thirty minutes for the full integration",
            ]),
            step_title_patterns: strings(&[
                "Generate a Session Token",
                "Wire Up the {language} Client",
                "Create a Room from Code",
                "Handle the Join Flow",
                "Add Error Handling",
                "Test End to End",
                "Ship It",
            ]),
            step_body_patterns: strings(&[
                "Request a short-lived token from {product}; no long-lived \
                 credentials ever touch your codebase.",
                "A plain HTTP client is enough; {product} keeps the surface \
                 small on purpose, which suits idiomatic {language}.",
                "One POST creates an encrypted room and returns the join link \
                 your application hands to users.",
                "Treat expired rooms as a normal case; they are how {product} \
                 guarantees sessions leave nothing behind.",
                "The integration test is the demo: open the link, speak, and \
                 confirm the session closes cleanly.",
                "From here your {language} service can {action} on demand with \
                 a handful of lines.",
            ]),
            tip_patterns: strings(&[
                "Keep tokens short-lived and server-side",
                "Log room lifecycle events, never room contents",
                "Retry creation, not joining; rooms are disposable",
                "Pin the API version in your {language} client",
            ]),
        },
        conclusion_patterns: strings(&[
            "That's the entire integration: {product} stays out of your way so \
             your {language} code stays small.",
            "A disposable-room model means less state to manage, the rare API \
             where deleting code is the upgrade.",
        ]),
        takeaway_patterns: strings(&[
            "{product} integrates with a plain HTTP client",
            "No SDK lock-in for {language} projects",
            "Rooms are disposable; design for it",
            "Short-lived tokens keep credentials out of code",
            "The whole integration fits in an afternoon",
        ]),
        required_tokens: vec![
            TokenBinding::new("product", "products"),
            TokenBinding::new("language", "languages"),
            TokenBinding::new("action", "actions"),
        ],
        primary_token: "product".to_string(),
    }
}
