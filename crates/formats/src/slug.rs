//! Filesystem-safe slugs derived from article titles.

/// Lowercases the title, maps whitespace to hyphens, drops anything outside
/// `[a-z0-9-]`, and collapses hyphen runs.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_hyphen = true;

    for ch in title.chars() {
        let mapped = if ch.is_ascii_alphanumeric() {
            Some(ch.to_ascii_lowercase())
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            Some('-')
        } else {
            None
        };

        match mapped {
            Some('-') => {
                if !last_hyphen {
                    slug.push('-');
                    last_hyphen = true;
                }
            }
            Some(c) => {
                slug.push(c);
                last_hyphen = false;
            }
            None => {}
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("10 Best VoIP Apps for 2026"), "10-best-voip-apps-for-2026");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slugify("Why CallShield? A Complete Guide!"), "why-callshield-a-complete-guide");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(slugify("one -- two  --  three"), "one-two-three");
        assert_eq!(slugify("  leading and trailing  "), "leading-and-trailing");
    }

    #[test]
    fn test_non_ascii_removed() {
        assert_eq!(slugify("Café für Alle"), "caf-fr-alle");
    }
}
