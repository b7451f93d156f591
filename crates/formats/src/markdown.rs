//! Flowed-text rendering: heading, intro, takeaways, per-kind sections,
//! conclusion, and a trailing generation comment block.

use std::fmt::Write;

use article_core::types::{ContentSection, GeneratedArticle};

pub fn to_markdown(article: &GeneratedArticle) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# {}\n", article.title);
    let _ = writeln!(md, "{}\n", article.intro);

    if !article.key_takeaways.is_empty() {
        md.push_str("## Key Takeaways\n");
        for takeaway in &article.key_takeaways {
            let _ = writeln!(md, "- {takeaway}");
        }
        md.push('\n');
    }

    for section in &article.content_sections {
        render_section(&mut md, section);
    }

    let _ = writeln!(md, "## Conclusion\n");
    let _ = writeln!(md, "{}\n", article.conclusion);

    let _ = writeln!(md, "<!-- Generated: {} -->", article.generated_at.to_rfc3339());
    let _ = writeln!(md, "<!-- Template: {} -->", article.template_type);

    md
}

fn render_section(md: &mut String, section: &ContentSection) {
    match section {
        ContentSection::ListItem {
            number,
            title,
            content,
            benefits,
        } => {
            let _ = writeln!(md, "## {number}. {title}\n");
            let _ = writeln!(md, "{content}\n");
            if !benefits.is_empty() {
                md.push_str("**Key Benefits:**\n");
                for benefit in benefits {
                    let _ = writeln!(md, "- {benefit}");
                }
                md.push('\n');
            }
        }
        ContentSection::Steps { title, steps } => {
            let _ = writeln!(md, "## {title}\n");
            for (i, step) in steps.iter().enumerate() {
                let _ = writeln!(md, "### Step {}: {}\n", i + 1, step.title);
                let _ = writeln!(md, "{}\n", step.description);
            }
        }
        ContentSection::ComparisonTable {
            title,
            headers,
            rows,
        } => {
            let _ = writeln!(md, "## {title}\n");
            let _ = writeln!(md, "| {} |", headers.join(" | "));
            let _ = writeln!(md, "|{}", " --- |".repeat(headers.len()));
            for row in rows {
                let _ = writeln!(md, "| {} |", row.join(" | "));
            }
            md.push('\n');
        }
        ContentSection::Subsections { title, subsections } => {
            let _ = writeln!(md, "## {title}\n");
            for sub in subsections {
                let _ = writeln!(md, "### {}\n", sub.title);
                let _ = writeln!(md, "{}\n", sub.content);
            }
        }
        ContentSection::Resources { title, resources } => {
            let _ = writeln!(md, "## {title}\n");
            for res in resources {
                let _ = writeln!(md, "- **{}:** {}", res.resource_type, res.description);
            }
            md.push('\n');
        }
    }
}
