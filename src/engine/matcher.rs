//! Input normalization, extension filter and keyword test. Pure functions, no state.

/// Split a comma-separated list, trim each part, drop empty parts. Order kept, no dedup.
pub fn normalize_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// True if `name` ends with any of `extensions` (exact, case-sensitive suffix).
pub fn has_allowed_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// True if the lower-cased `line` contains any lower-cased keyword.
pub fn contains_any_keyword(line: &str, keywords: &[String]) -> bool {
    KeywordMatcher::new(keywords).is_match(line)
}

/// Keyword set with lower-casing done once up front, for per-line use in the scanner.
#[derive(Clone, Debug)]
pub struct KeywordMatcher {
    lowered: Vec<String>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            lowered: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Lower-cases `line` once and checks each keyword as a substring.
    pub fn is_match(&self, line: &str) -> bool {
        let line = line.to_lowercase();
        self.lowered.iter().any(|k| line.contains(k.as_str()))
    }
}
