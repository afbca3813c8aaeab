//! Meta-description shortening.
//!
//! Search engines cut snippets at roughly 160 characters. [`Shortener`]
//! brings an over-long description under a character budget while keeping
//! whole sentences or words:
//!
//! 1. Text within the limit is returned untouched (no trimming either).
//! 2. Filler phrases are dropped and wordy phrases replaced.
//! 3. Whitespace is collapsed; if that suffices, the condensed text is returned.
//! 4. Otherwise whole sentences, then whole words, are kept within
//!    `limit - 3` and an ellipsis is appended.
//!
//! Output of an over-limit input never exceeds the limit, so shortening is
//! idempotent.

use super::phrases::{FILLER_PHRASES, WORDY_PHRASES};
use crate::utils::text::{char_len, take_chars};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Character budget for meta descriptions.
pub const DEFAULT_LIMIT: usize = 160;

/// Marker appended after truncation.
const ELLIPSIS: &str = "...";
const ELLIPSIS_LEN: usize = ELLIPSIS.len();

/// Sentence separator used when keeping whole sentences.
const SENTENCE_BREAK: &str = ". ";

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:!?])").unwrap());

static DEFAULT_SHORTENER: LazyLock<Shortener> = LazyLock::new(Shortener::default);

/// Shorten `text` to at most `limit` characters using the built-in phrase tables.
///
/// ```ignore
/// let desc = shorten(&long_description, DEFAULT_LIMIT);
/// assert!(desc.chars().count() <= DEFAULT_LIMIT);
/// ```
pub fn shorten(text: &str, limit: usize) -> Cow<'_, str> {
    DEFAULT_SHORTENER.shorten(text, limit)
}

/// Compiled phrase rules for condensing descriptions.
#[derive(Debug, Clone)]
pub struct Shortener {
    filler: Regex,
    wordy: Vec<(Regex, &'static str)>,
}

impl Default for Shortener {
    fn default() -> Self {
        Self::with_extra_filler::<&str>(&[]).expect("built-in phrase tables compile")
    }
}

impl Shortener {
    /// Build a shortener that also drops the given filler phrases.
    ///
    /// Phrases are matched literally (regex metacharacters are escaped),
    /// case-insensitively and on word boundaries.
    pub fn with_extra_filler<S: AsRef<str>>(extra: &[S]) -> Result<Self, regex::Error> {
        let mut phrases: Vec<String> = FILLER_PHRASES
            .iter()
            .copied()
            .chain(extra.iter().map(|p| p.as_ref()))
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        // Longest first: alternation picks the first branch that matches
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();

        let alternation = phrases
            .iter()
            .map(|p| whole_phrase(p))
            .collect::<Vec<_>>()
            .join("|");
        let filler = Regex::new(&format!("(?i)(?:{alternation})"))?;

        let wordy = WORDY_PHRASES
            .iter()
            .map(|(pattern, replacement)| {
                Regex::new(&format!(r"(?i)\b{}", regex::escape(pattern)))
                    .map(|re| (re, *replacement))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { filler, wordy })
    }

    /// Shorten `text` to at most `limit` characters.
    ///
    /// Text already within the limit is borrowed back unchanged.
    pub fn shorten<'a>(&self, text: &'a str, limit: usize) -> Cow<'a, str> {
        if char_len(text) <= limit {
            return Cow::Borrowed(text);
        }

        let condensed = self.condense(text);
        if char_len(&condensed) <= limit {
            return Cow::Owned(condensed);
        }

        Cow::Owned(truncate(&condensed, limit))
    }

    /// Drop filler, replace wordy phrases and normalize whitespace.
    pub fn condense(&self, text: &str) -> String {
        let mut out = self.filler.replace_all(text, "").into_owned();
        for (re, replacement) in &self.wordy {
            out = re.replace_all(&out, NoExpand(*replacement)).into_owned();
        }
        let out = RE_WHITESPACE.replace_all(&out, " ");
        let out = RE_SPACE_BEFORE_PUNCT.replace_all(&out, "$1");
        out.trim().to_string()
    }
}

/// Escape a phrase and anchor it on word boundaries where it starts or ends
/// with a word character.
fn whole_phrase(phrase: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if phrase.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(phrase));
    if phrase.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Cut `text` to fit `limit`, keeping whole sentences or words.
fn truncate(text: &str, limit: usize) -> String {
    // No room for an ellipsis: plain cut
    if limit <= ELLIPSIS_LEN {
        return take_chars(text, limit).trim_end().to_string();
    }
    let budget = limit - ELLIPSIS_LEN;

    let mut out = keep_sentences(text, budget);
    if out.is_empty() {
        out = keep_words(text, budget);
    }
    if out.is_empty() {
        out = take_chars(text, budget).trim_end().to_string();
    }

    let mut out = out
        .trim_end_matches([',', ';', ':', '-'])
        .trim_end()
        .to_string();
    if char_len(&out) < char_len(text) {
        // Avoid four dots after a full stop
        out.push_str(if out.ends_with('.') { ".." } else { ELLIPSIS });
    }
    out.trim().to_string()
}

/// Accumulate whole sentences while they fit in `budget` characters.
fn keep_sentences(text: &str, budget: usize) -> String {
    let mut out = String::new();
    let mut len = 0;

    for sentence in text.split(SENTENCE_BREAK).map(str::trim) {
        if sentence.is_empty() {
            continue;
        }
        let terminated = sentence.ends_with(['.', '!', '?']);
        let sentence_len = char_len(sentence) + usize::from(!terminated);
        let sep = usize::from(!out.is_empty());
        if len + sep + sentence_len > budget {
            break;
        }

        if sep == 1 {
            out.push(' ');
        }
        out.push_str(sentence);
        if !terminated {
            out.push('.');
        }
        len += sep + sentence_len;
    }

    out
}

/// Accumulate whole words while they fit in `budget` characters.
fn keep_words(text: &str, budget: usize) -> String {
    let mut out = String::new();
    let mut len = 0;

    for word in text.split_whitespace() {
        let word_len = char_len(word);
        let sep = usize::from(!out.is_empty());
        if len + sep + word_len > budget {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
        len += sep + word_len;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_short_text_unchanged() {
        let text = "  Pour-over basics: ratio, grind and bloom.  ";
        assert!(matches!(shorten(text, DEFAULT_LIMIT), Cow::Borrowed(t) if t == text));
    }

    #[test]
    fn test_empty_unchanged() {
        assert_eq!(shorten("", DEFAULT_LIMIT), "");
    }

    #[test]
    fn test_exactly_at_limit_unchanged() {
        let text = "b".repeat(DEFAULT_LIMIT);
        assert_eq!(shorten(&text, DEFAULT_LIMIT), text.as_str());
    }

    #[test]
    fn test_single_long_word_hard_cut() {
        let text = "A".repeat(200);
        let out = shorten(&text, DEFAULT_LIMIT);
        assert_eq!(len(&out), DEFAULT_LIMIT);
        assert!(out.ends_with("..."));
        assert_eq!(out.trim_end_matches('.'), "A".repeat(157));
    }

    #[test]
    fn test_word_boundary_truncation() {
        let text = "espresso ".repeat(30);
        let out = shorten(&text, DEFAULT_LIMIT);
        assert!(len(&out) <= DEFAULT_LIMIT);
        assert!(out.ends_with("espresso..."));
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_filler_removal_suffices() {
        let text = "This is a comprehensive and in-depth guide to espresso machines that covers \
                    everything you need to know about home brewing, so you can learn how to dial \
                    in your grinder and dive deep into extraction.";
        assert!(len(text) > DEFAULT_LIMIT);

        let out = shorten(text, DEFAULT_LIMIT);
        assert!(len(&out) <= DEFAULT_LIMIT);
        assert!(!out.ends_with("..."));
        assert!(!out.to_lowercase().contains("comprehensive"));
        assert!(out.contains("explore extraction."));
        assert!(out.contains("so you can dial in"));
    }

    #[test]
    fn test_filler_case_insensitive_whole_word() {
        let shortener = Shortener::default();
        assert_eq!(
            shortener.condense("The COMPREHENSIVE list of Every roaster"),
            "The list of Every roaster"
        );
        // "very" must not be cut out of "every"
        assert_eq!(shortener.condense("every very good cup"), "every good cup");
    }

    #[test]
    fn test_condense_tidies_punctuation() {
        let shortener = Shortener::default();
        assert_eq!(
            shortener.condense("A really , in-depth look ."),
            "A, look."
        );
    }

    #[test]
    fn test_sentence_truncation_uses_two_dots() {
        let first = "Cold brew is coffee steeped in cold water for twelve to twenty four hours";
        let second = "It tastes smooth and sweet with very little bitterness or acidity at all";
        let third = "Serve it over ice with milk or enjoy it black on a hot summer afternoon";
        let text = format!("{first}. {second}. {third}.");
        assert!(len(&text) > DEFAULT_LIMIT);

        let out = shorten(&text, DEFAULT_LIMIT);
        assert!(len(&out) <= DEFAULT_LIMIT);
        assert!(out.starts_with(first));
        assert!(out.ends_with("..."));
        assert!(!out.ends_with("...."));
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            String::new(),
            "short".to_string(),
            "A".repeat(200),
            "grind ".repeat(40),
            "One sentence here. ".repeat(20),
            "Café crème, naturellement. ".repeat(10),
        ];
        for input in &inputs {
            let once = shorten(input, DEFAULT_LIMIT).into_owned();
            let twice = shorten(&once, DEFAULT_LIMIT).into_owned();
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_over_limit_always_fits() {
        for limit in [4, 10, 50, 160] {
            for input in ["word ".repeat(100), "x".repeat(300), "Hi. ".repeat(100)] {
                let out = shorten(&input, limit);
                assert!(len(&out) <= limit, "limit {limit}: {out:?}");
            }
        }
    }

    #[test]
    fn test_multibyte_counts_chars_not_bytes() {
        // 100 chars, 200 bytes: under the limit by character count
        let text = "é".repeat(100);
        assert_eq!(shorten(&text, DEFAULT_LIMIT), text.as_str());

        let text = "é".repeat(200);
        let out = shorten(&text, DEFAULT_LIMIT);
        assert_eq!(len(&out), DEFAULT_LIMIT);
    }

    #[test]
    fn test_tiny_limit_has_no_ellipsis() {
        assert_eq!(shorten("abcdef", 3), "abc");
        assert_eq!(shorten("abcdef", 0), "");
    }

    #[test]
    fn test_extra_filler() {
        let shortener = Shortener::with_extra_filler(&["must-have"]).unwrap();
        assert_eq!(
            shortener.condense("The must-have grinder (2024)"),
            "The grinder (2024)"
        );
        // Metacharacters are matched literally
        let shortener = Shortener::with_extra_filler(&["(Sponsored)"]).unwrap();
        assert_eq!(shortener.condense("Beans (sponsored) review"), "Beans review");
    }
}
