//! Product name search patterns.

use smallvec::SmallVec;

/// Tokens shorter than this many characters are ignored.
pub const MIN_TOKEN_CHARS: usize = 2;

/// `ILIKE` patterns derived from a free-text query.
///
/// A product matches when its name contains the whole query, starts with it, or contains any
/// single token of it. Matching is case-insensitive and `%`, `_` and `\` in the query are
/// matched literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPatterns {
    pub contains: String,
    pub starts_with: String,
    pub tokens: SmallVec<[String; 4]>,
}

impl SearchPatterns {
    /// Build patterns for `query`, or `None` when the query is blank.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim();

        if query.is_empty() {
            return None;
        }

        let escaped = escape_like(query);

        let mut tokens: SmallVec<[String; 4]> = SmallVec::new();

        for token in query.split_whitespace() {
            if token.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }

            let pattern = format!("%{}%", escape_like(token));

            if !tokens.contains(&pattern) {
                tokens.push(pattern);
            }
        }

        Some(Self {
            contains: format!("%{escaped}%"),
            starts_with: format!("{escaped}%"),
            tokens,
        })
    }

    #[must_use]
    pub fn token_patterns(&self) -> Vec<String> {
        self.tokens.to_vec()
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_has_no_patterns() {
        assert_eq!(SearchPatterns::from_query(""), None);
        assert_eq!(SearchPatterns::from_query("   \t"), None);
    }

    #[test]
    fn whole_query_is_trimmed_and_wrapped() {
        let patterns = SearchPatterns::from_query("  red ball ").expect("non-blank query");

        assert_eq!(patterns.contains, "%red ball%");
        assert_eq!(patterns.starts_with, "red ball%");
        assert_eq!(patterns.token_patterns(), ["%red%", "%ball%"]);
    }

    #[test]
    fn short_tokens_are_skipped_by_character_count() {
        let patterns = SearchPatterns::from_query("a кубик я ёж").expect("non-blank query");

        assert_eq!(patterns.token_patterns(), ["%кубик%", "%ёж%"]);
    }

    #[test]
    fn duplicate_tokens_are_collapsed() {
        let patterns = SearchPatterns::from_query("toy toy car").expect("non-blank query");

        assert_eq!(patterns.token_patterns(), ["%toy%", "%car%"]);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        let patterns = SearchPatterns::from_query("100%_off\\").expect("non-blank query");

        assert_eq!(patterns.contains, "%100\\%\\_off\\\\%");
    }
}
