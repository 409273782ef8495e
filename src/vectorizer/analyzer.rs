use regex::Regex;

/// Term pattern of the count vectorizer: runs of two or more word characters.
pub const TERM_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Splits tag tokens into vocabulary terms.
///
/// Each token is lower-cased and then scanned for [`TERM_PATTERN`] matches,
/// so `"Sci-Fi"` becomes `["sci", "fi"]` and single characters are dropped.
/// Name tokens produced by the metadata normalizer contain no whitespace and
/// usually pass through as one term.
#[derive(Debug, Clone)]
pub struct Analyzer {
    pattern: Regex,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TERM_PATTERN).expect("term pattern is a valid regex"),
        }
    }

    /// Terms of a single token, in order.
    pub fn terms(&self, token: &str) -> Vec<String> {
        let lowered = token.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Terms of a token sequence, flattened in order.
    pub fn analyze<T>(&self, tokens: &[T]) -> Vec<String>
    where
        T: AsRef<str>,
    {
        tokens
            .iter()
            .flat_map(|token| self.terms(token.as_ref()))
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_keeps_multi_char_terms() {
        let analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze(&["Space", "a", "HERO"]), vec!["space", "hero"]);
    }

    #[test]
    fn splits_on_punctuation() {
        let analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze(&["Sci-Fi", "world."]), vec!["sci", "fi", "world"]);
    }

    #[test]
    fn collapsed_names_stay_whole() {
        let analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze(&["SamWorthington"]), vec!["samworthington"]);
    }

    #[test]
    fn empty_input() {
        let analyzer = Analyzer::new();
        assert!(analyzer.analyze::<&str>(&[]).is_empty());
        assert!(analyzer.analyze(&["", "!"]).is_empty());
    }
}
