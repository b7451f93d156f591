//! Markup rendering: a full document wrapper with a metadata block and the
//! same per-kind section structure as the flowed-text format.

use std::fmt::Write;

use article_core::types::{ContentSection, GeneratedArticle};

use crate::schema::{schema_markup, DEFAULT_ORGANIZATION};

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{{meta_description}}">
    <meta name="keywords" content="{{meta_keywords}}">
    <title>{{title}}</title>
    <script type="application/ld+json">{{schema}}</script>
</head>
<body>
{{content}}
</body>
</html>
"#;

pub fn to_html(article: &GeneratedArticle) -> String {
    let content = article_body(article);
    let schema = schema_markup(article, DEFAULT_ORGANIZATION).to_string();
    DOCUMENT_TEMPLATE
        .replace("{{title}}", &escape(&article.title))
        .replace("{{meta_description}}", &escape(&article.meta.description))
        .replace("{{meta_keywords}}", &escape(&article.meta.keywords.join(", ")))
        .replace("{{schema}}", &schema)
        .replace("{{content}}", &content)
}

fn article_body(article: &GeneratedArticle) -> String {
    let mut html = String::from("<article class=\"seo-article\">\n");

    let _ = writeln!(html, "  <h1 class=\"article-title\">{}</h1>", escape(&article.title));
    html.push_str("  <div class=\"article-intro\">\n");
    let _ = writeln!(html, "    <p>{}</p>", escape(&article.intro));
    html.push_str("  </div>\n");

    if !article.key_takeaways.is_empty() {
        html.push_str("  <div class=\"key-takeaways\">\n");
        html.push_str("    <h2>Key Takeaways</h2>\n");
        html.push_str("    <ul>\n");
        for takeaway in &article.key_takeaways {
            let _ = writeln!(html, "      <li>{}</li>", escape(takeaway));
        }
        html.push_str("    </ul>\n");
        html.push_str("  </div>\n");
    }

    for section in &article.content_sections {
        render_section(&mut html, section);
    }

    html.push_str("  <div class=\"article-conclusion\">\n");
    html.push_str("    <h2>Conclusion</h2>\n");
    let _ = writeln!(html, "    <p>{}</p>", escape(&article.conclusion));
    html.push_str("  </div>\n");

    html.push_str("</article>");
    html
}

fn render_section(html: &mut String, section: &ContentSection) {
    html.push_str("  <section class=\"article-section\">\n");

    match section {
        ContentSection::ListItem {
            number,
            title,
            content,
            benefits,
        } => {
            let _ = writeln!(html, "    <h2>{number}. {}</h2>", escape(title));
            let _ = writeln!(html, "    <p>{}</p>", escape(content));
            if !benefits.is_empty() {
                html.push_str("    <ul class=\"benefits\">\n");
                for benefit in benefits {
                    let _ = writeln!(html, "      <li>{}</li>", escape(benefit));
                }
                html.push_str("    </ul>\n");
            }
        }
        ContentSection::Steps { title, steps } => {
            let _ = writeln!(html, "    <h2>{}</h2>", escape(title));
            html.push_str("    <ol class=\"steps\">\n");
            for step in steps {
                html.push_str("      <li>\n");
                let _ = writeln!(html, "        <h3>{}</h3>", escape(&step.title));
                let _ = writeln!(html, "        <p>{}</p>", escape(&step.description));
                html.push_str("      </li>\n");
            }
            html.push_str("    </ol>\n");
        }
        ContentSection::ComparisonTable {
            title,
            headers,
            rows,
        } => {
            let _ = writeln!(html, "    <h2>{}</h2>", escape(title));
            html.push_str("    <table class=\"comparison-table\">\n");
            html.push_str("      <thead>\n        <tr>\n");
            for header in headers {
                let _ = writeln!(html, "          <th>{}</th>", escape(header));
            }
            html.push_str("        </tr>\n      </thead>\n");
            html.push_str("      <tbody>\n");
            for row in rows {
                html.push_str("        <tr>\n");
                for cell in row {
                    let _ = writeln!(html, "          <td>{}</td>", escape(cell));
                }
                html.push_str("        </tr>\n");
            }
            html.push_str("      </tbody>\n");
            html.push_str("    </table>\n");
        }
        ContentSection::Subsections { title, subsections } => {
            let _ = writeln!(html, "    <h2>{}</h2>", escape(title));
            for sub in subsections {
                let _ = writeln!(html, "    <h3>{}</h3>", escape(&sub.title));
                let _ = writeln!(html, "    <p>{}</p>", escape(&sub.content));
            }
        }
        ContentSection::Resources { title, resources } => {
            let _ = writeln!(html, "    <h2>{}</h2>", escape(title));
            html.push_str("    <ul class=\"resources\">\n");
            for res in resources {
                let _ = writeln!(
                    html,
                    "      <li><strong>{}:</strong> {}</li>",
                    escape(&res.resource_type),
                    escape(&res.description)
                );
            }
            html.push_str("    </ul>\n");
        }
    }

    html.push_str("  </section>\n");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
