//! URL slugs for news articles.

/// Build a slug from free text.
///
/// Lower-cases, drops everything outside `[a-z0-9 -]`, turns whitespace
/// runs into `-`, collapses dash runs and trims surrounding whitespace.
/// Leading or trailing dashes are kept.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for c in kept.chars() {
        let c = if c == ' ' { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("New Studio Opening"), "new-studio-opening");
    }

    #[test]
    fn test_drops_punctuation_and_non_ascii() {
        assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
        assert_eq!(slugify("Güzel Tasarım"), "gzel-tasarm");
    }

    #[test]
    fn test_collapses_runs() {
        assert_eq!(slugify("a   b"), "a-b");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn test_edge_dashes_kept() {
        assert_eq!(slugify(" lead"), "-lead");
        assert_eq!(slugify("trail "), "trail-");
        assert_eq!(slugify(""), "");
    }
}
