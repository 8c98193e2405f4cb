//! Content Analysis Module
//!
//! Lightweight keyword and summary extraction used when a client asks for
//! analysis alongside its title suggestions.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Keywords returned in an analysis
pub const ANALYSIS_KEYWORDS: usize = 5;

/// Maximum summary length in characters
pub const SUMMARY_MAX_LENGTH: usize = 200;

/// Sentences joined into a summary
const SUMMARY_SENTENCES: usize = 3;

/// Words shorter than this are never keywords
const MIN_KEYWORD_CHARS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what", "which", "this", "that",
    "these", "those", "then", "just", "so", "than", "such", "both", "through", "about", "for",
    "is", "of", "while", "during", "to", "in", "at", "by", "on", "with", "from", "be", "been",
    "being", "have", "has", "had", "do", "does", "did", "i", "you", "he", "she", "it", "we",
    "they", "me", "him", "her", "us", "them", "who", "whom", "whose", "where", "when", "why",
    "how",
];

/// Errors raised by the analysis helpers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Input had no non-whitespace characters
    #[error("Input text cannot be empty")]
    EmptyText,

    /// A size parameter was out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Keywords and summary for one piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentAnalysis {
    pub keywords: Vec<String>,
    pub summary: String,
}

/// Runs the analysis attached to a suggestion response.
///
/// Both keywords and summary are taken from the content as submitted.
pub fn analyze(content: &str) -> Result<ContentAnalysis, AnalysisError> {
    let keywords = extract_keywords(content, ANALYSIS_KEYWORDS)?
        .into_iter()
        .map(|(word, _)| word)
        .collect();
    let summary = content_summary(content, SUMMARY_MAX_LENGTH)?;
    Ok(ContentAnalysis { keywords, summary })
}

// == Keywords ==
/// Returns the `top_n` most frequent non-stop-words with their counts.
///
/// Ties keep the order in which the words first appeared.
pub fn extract_keywords(text: &str, top_n: usize) -> Result<Vec<(String, usize)>, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyText);
    }
    if top_n == 0 {
        return Err(AnalysisError::InvalidParameter(
            "top_n must be a positive integer".to_string(),
        ));
    }

    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();

    // word -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in lowered
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_CHARS && !STOP_WORDS.contains(w))
        .enumerate()
    {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(word, (count, _))| (word.to_string(), count))
        .collect())
}

// == Sentences ==
/// Splits `text` into at most `max_sentences` sentences.
///
/// A break happens at whitespace following `.`, `?` or `!`, except after
/// abbreviations such as `e.g.` or `Mr.`.
pub fn extract_sentences(text: &str, max_sentences: usize) -> Result<Vec<String>, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyText);
    }
    if max_sentences == 0 {
        return Err(AnalysisError::InvalidParameter(
            "max_sentences must be a positive integer".to_string(),
        ));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() && is_sentence_break(&chars, i) {
            push_trimmed(&mut sentences, &current);
            current.clear();
        } else {
            current.push(c);
        }
    }
    push_trimmed(&mut sentences, &current);

    sentences.truncate(max_sentences);
    Ok(sentences)
}

fn is_sentence_break(chars: &[char], i: usize) -> bool {
    if i == 0 || !matches!(chars[i - 1], '.' | '?' | '!') {
        return false;
    }
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    // "e.g." style: word char, dot, word char, terminator
    if i >= 4 && is_word(chars[i - 4]) && chars[i - 3] == '.' && is_word(chars[i - 2]) {
        return false;
    }
    // "Mr." style: capital, lowercase, dot
    if i >= 3
        && chars[i - 3].is_ascii_uppercase()
        && chars[i - 2].is_ascii_lowercase()
        && chars[i - 1] == '.'
    {
        return false;
    }
    true
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

// == Summary ==
/// Joins the first sentences of `text`, cut to `max_length` characters.
pub fn content_summary(text: &str, max_length: usize) -> Result<String, AnalysisError> {
    if max_length < 4 {
        return Err(AnalysisError::InvalidParameter(
            "max_length must be at least 4".to_string(),
        ));
    }

    let summary = extract_sentences(text, SUMMARY_SENTENCES)?.join(" ");
    if summary.chars().count() <= max_length {
        return Ok(summary);
    }

    let mut cut: String = summary.chars().take(max_length - 3).collect();
    cut.push_str("...");
    Ok(cut)
}

// == Normalisation ==
/// Lowercases `text`, collapses whitespace and strips URLs, e-mail
/// addresses and HTML tags.
pub fn clean_and_normalize(text: &str) -> String {
    static PATTERNS: OnceLock<[Regex; 4]> = OnceLock::new();
    let [whitespace, urls, emails, tags] = PATTERNS.get_or_init(|| {
        [
            Regex::new(r"\s+").expect("valid whitespace pattern"),
            Regex::new(r"https?://\S+|www\.\S+").expect("valid url pattern"),
            Regex::new(r"\S+@\S+").expect("valid email pattern"),
            Regex::new(r"<.*?>").expect("valid tag pattern"),
        ]
    });

    let text = text.to_lowercase();
    let text = whitespace.replace_all(&text, " ");
    let text = urls.replace_all(&text, "");
    let text = emails.replace_all(&text, "");
    let text = tags.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "Machine learning is changing software. Machine learning models need data! \
        Teams ship machine learning to production every week. Data pipelines matter.";

    #[test]
    fn test_keywords_ranked_by_frequency() {
        let keywords = extract_keywords(POST, 3).unwrap();
        assert_eq!(
            keywords,
            vec![
                ("machine".to_string(), 3),
                ("learning".to_string(), 3),
                ("data".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_keywords_skip_stop_words_and_short_words() {
        let keywords = extract_keywords("The AI is on it, and so are we: rust rust.", 10).unwrap();
        assert_eq!(keywords, vec![("rust".to_string(), 2), ("are".to_string(), 1)]);
    }

    #[test]
    fn test_keywords_only_stop_words() {
        assert!(extract_keywords("the and of to", 5).unwrap().is_empty());
    }

    #[test]
    fn test_keywords_reject_bad_input() {
        assert_eq!(extract_keywords("   ", 5), Err(AnalysisError::EmptyText));
        assert!(matches!(
            extract_keywords("text", 0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_sentences_split_on_terminators() {
        let sentences = extract_sentences("One. Two? Three! Four.", 10).unwrap();
        assert_eq!(sentences, vec!["One.", "Two?", "Three!", "Four."]);
    }

    #[test]
    fn test_sentences_keep_abbreviations() {
        let sentences =
            extract_sentences("Mr. Smith uses tools, e.g. linters. Then he ships.", 10).unwrap();
        assert_eq!(
            sentences,
            vec!["Mr. Smith uses tools, e.g. linters.", "Then he ships."]
        );
    }

    #[test]
    fn test_sentences_limit() {
        assert_eq!(extract_sentences("A. B. C.", 2).unwrap(), vec!["A.", "B."]);
    }

    #[test]
    fn test_summary_short_text_untouched() {
        let summary = content_summary("First. Second. Third. Fourth.", 200).unwrap();
        assert_eq!(summary, "First. Second. Third.");
    }

    #[test]
    fn test_summary_truncated() {
        let summary = content_summary(POST, 20).unwrap();
        assert_eq!(summary.chars().count(), 20);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_clean_and_normalize() {
        let cleaned = clean_and_normalize(
            "Visit  https://example.com/post or www.blog.dev,\n mail me@example.com <b>NOW</b>",
        );
        assert_eq!(cleaned, "visit  or  mail  now");
    }

    #[test]
    fn test_analyze_combines_keywords_and_summary() {
        let analysis = analyze(POST).unwrap();
        assert_eq!(analysis.keywords.len(), ANALYSIS_KEYWORDS);
        assert_eq!(analysis.keywords[0], "machine");
        assert!(analysis.summary.starts_with("Machine learning is changing software."));
    }

    #[test]
    fn test_analyze_link_only_content() {
        let content = "https://example.com/a-very-long-path/about-rust-programming-language";
        let analysis = analyze(content).unwrap();
        assert_eq!(
            analysis.keywords,
            vec!["https", "example", "com", "very", "long"]
        );
        assert_eq!(analysis.summary, content);
    }

    #[test]
    fn test_analyze_counts_words_inside_urls() {
        let content = "Read about rust at https://rust-lang.org and learn rust today.";
        let analysis = analyze(content).unwrap();
        assert_eq!(analysis.keywords[0], "rust");
        assert!(analysis.keywords.contains(&"lang".to_string()));
    }
}
