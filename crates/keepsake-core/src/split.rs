//! Boundary-preserving text splitter.
//!
//! Splits one memory body into an ordered sequence of [`Segment`]s that
//! share a group id. Sizes are measured in characters, not bytes.
//!
//! # Algorithm
//!
//! 1. If the text fits in `max_chars`, return it unchanged as one segment.
//! 2. Split on blank lines into paragraphs and accumulate them into a
//!    buffer joined by `"\n\n"`. When the next paragraph would push the
//!    buffer past `max_chars` *and* the buffer already holds more than
//!    `min_chars`, flush the buffer as a segment.
//! 3. A paragraph longer than `max_chars` flushes the buffer and is split
//!    into sentences (`.`, `!` or `?` followed by whitespace), which are
//!    accumulated under the same rule, joined by `" "`.
//! 4. A sentence longer than `max_chars` flushes the buffer and is split on
//!    whitespace. Words accumulate with no minimum-size allowance. A single
//!    word longer than `max_chars` is cut at character boundaries.
//! 5. The trailing buffer is flushed and `segment_count` is backfilled.
//!
//! The minimum allowance means a paragraph-tier segment may exceed
//! `max_chars` by up to one paragraph when the buffer had not yet reached
//! `min_chars`. Fewer, larger segments are preferred over fragments.
//!
//! # Example
//!
//! ```rust
//! use keepsake_core::split::split_text;
//!
//! let segments = split_text("Dear diary.\n\nToday was long.", Some("g1"));
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].position, 1);
//! assert_eq!(segments[0].segment_count, 1);
//! ```

use uuid::Uuid;

use crate::error::LimitsError;
use crate::models::Segment;

/// Default upper bound on segment size, in characters.
pub const DEFAULT_MAX_CHARS: usize = 8000;

/// Default size a buffer must exceed before it may be flushed, in characters.
pub const DEFAULT_MIN_CHARS: usize = 2000;

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const INLINE_SEPARATOR: &str = " ";

/// Size thresholds governing the splitter.
///
/// Always satisfies `0 <= min_chars < max_chars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLimits {
    max_chars: usize,
    min_chars: usize,
}

impl SplitLimits {
    pub fn new(max_chars: usize, min_chars: usize) -> Result<Self, LimitsError> {
        if max_chars == 0 {
            return Err(LimitsError::ZeroMax);
        }
        if min_chars >= max_chars {
            return Err(LimitsError::MinNotBelowMax {
                min_chars,
                max_chars,
            });
        }
        Ok(Self {
            max_chars,
            min_chars,
        })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Default for SplitLimits {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

/// Split `text` with the default limits.
///
/// A fresh UUID is generated when `group_id` is `None`.
pub fn split_text(text: &str, group_id: Option<&str>) -> Vec<Segment> {
    split_text_with(text, group_id, &SplitLimits::default())
}

/// Split `text` into segments bounded by `limits`.
///
/// # Guarantees
///
/// - At least one segment is always returned (even for empty text).
/// - Positions are contiguous: `1, 2, …, N`.
/// - Every segment carries `segment_count == N` and the same `group_id`.
/// - Deterministic for a fixed `group_id`.
pub fn split_text_with(text: &str, group_id: Option<&str>, limits: &SplitLimits) -> Vec<Segment> {
    let group_id = group_id
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let pieces = split_pieces(text, limits);
    let count = pieces.len() as u32;

    tracing::debug!(
        group_id = %group_id,
        chars = char_len(text),
        segments = count,
        "split text"
    );

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, content)| Segment {
            group_id: group_id.clone(),
            position: i as u32 + 1,
            segment_count: count,
            content,
        })
        .collect()
}

fn split_pieces(text: &str, limits: &SplitLimits) -> Vec<String> {
    if char_len(text) <= limits.max_chars {
        return vec![text.to_string()];
    }

    let mut acc = Accumulator::new(*limits);

    for paragraph in paragraphs(text) {
        if char_len(paragraph) <= limits.max_chars {
            acc.push(paragraph, PARAGRAPH_SEPARATOR, true);
            continue;
        }

        acc.flush();
        for sentence in sentences(paragraph) {
            if char_len(sentence) <= limits.max_chars {
                acc.push(sentence, INLINE_SEPARATOR, true);
                continue;
            }

            acc.flush();
            for word in sentence.split_whitespace() {
                if char_len(word) <= limits.max_chars {
                    acc.push(word, INLINE_SEPARATOR, false);
                } else {
                    for piece in hard_split(word, limits.max_chars) {
                        acc.push(piece, INLINE_SEPARATOR, false);
                    }
                }
            }
        }
    }

    let mut pieces = acc.finish();
    if pieces.is_empty() {
        // Nothing but whitespace.
        pieces.push(text.trim().to_string());
    }
    pieces
}

/// Greedy buffer shared by all three tiers.
struct Accumulator {
    limits: SplitLimits,
    buf: String,
    buf_chars: usize,
    pieces: Vec<String>,
}

impl Accumulator {
    fn new(limits: SplitLimits) -> Self {
        Self {
            limits,
            buf: String::new(),
            buf_chars: 0,
            pieces: Vec::new(),
        }
    }

    /// Append `unit`, flushing first if it would overflow `max_chars`.
    ///
    /// With `allow_below_min`, a buffer still at or under `min_chars` keeps
    /// growing past `max_chars` instead of being flushed.
    fn push(&mut self, unit: &str, separator: &str, allow_below_min: bool) {
        let unit_chars = char_len(unit);
        if self.buf.is_empty() {
            self.buf.push_str(unit);
            self.buf_chars = unit_chars;
            return;
        }

        let would_be = self.buf_chars + char_len(separator) + unit_chars;
        let held_open = allow_below_min && self.buf_chars <= self.limits.min_chars;

        if would_be > self.limits.max_chars && !held_open {
            self.flush();
            self.buf.push_str(unit);
            self.buf_chars = unit_chars;
        } else {
            self.buf.push_str(separator);
            self.buf.push_str(unit);
            self.buf_chars = would_be;
        }
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.pieces.push(std::mem::take(&mut self.buf));
            self.buf_chars = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.pieces
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Trimmed, non-empty paragraphs separated by one or more blank lines.
fn paragraphs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                out.push(text[s..end].trim());
            }
        } else {
            if start.is_none() {
                start = Some(offset);
            }
            end = offset + line.len();
        }
        offset += line.len();
    }
    if let Some(s) = start {
        out.push(text[s..end].trim());
    }

    out
}

/// Trimmed, non-empty sentences. Terminal punctuation stays with its sentence.
fn sentences(paragraph: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                let sentence = paragraph[start..next_idx].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = next_idx;
            }
        }
    }

    let tail = paragraph[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }

    out
}

/// Cut `word` into pieces of at most `max_chars` characters.
fn hard_split(word: &str, max_chars: usize) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in word.char_indices() {
        if count == max_chars {
            out.push(&word[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < word.len() {
        out.push(&word[start..]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_limits() -> SplitLimits {
        SplitLimits::new(40, 10).unwrap()
    }

    #[test]
    fn test_short_text_single_segment_unchanged() {
        let text = "  Hello, world!\n\nSecond line.  ";
        let segments = split_text(text, Some("g1"));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, text);
        assert_eq!(segments[0].position, 1);
        assert_eq!(segments[0].segment_count, 1);
        assert_eq!(segments[0].group_id, "g1");
    }

    #[test]
    fn test_empty_text() {
        let segments = split_text("", None);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "");
        assert_eq!(segments[0].segment_count, 1);
    }

    #[test]
    fn test_generated_group_id_is_uuid_and_shared() {
        let text = "word ".repeat(3000);
        let segments = split_text(&text, None);
        assert!(segments.len() > 1);
        assert!(Uuid::parse_str(&segments[0].group_id).is_ok());
        assert!(segments.iter().all(|s| s.group_id == segments[0].group_id));
    }

    #[test]
    fn test_exactly_max_is_one_segment() {
        let text = "a".repeat(DEFAULT_MAX_CHARS);
        let segments = split_text(&text, Some("g"));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, text);
    }

    #[test]
    fn test_sizes_are_characters_not_bytes() {
        // 8000 chars, 16000 bytes.
        let text = "é".repeat(DEFAULT_MAX_CHARS);
        assert_eq!(split_text(&text, Some("g")).len(), 1);
    }

    #[test]
    fn test_unbroken_run_is_cut_to_max() {
        let text = "A".repeat(9000);
        let segments = split_text(&text, Some("g"));
        assert!(segments.len() >= 2);
        for (i, s) in segments.iter().enumerate() {
            assert!(s.content.chars().count() <= DEFAULT_MAX_CHARS);
            assert_eq!(s.position, i as u32 + 1);
            assert_eq!(s.segment_count, segments.len() as u32);
        }
        let total: usize = segments.iter().map(|s| s.content.len()).sum();
        assert_eq!(total, 9000);
    }

    #[test]
    fn test_paragraphs_group_until_max() {
        let text = "aaaaaaaaaaaaaaa\n\nbbbbbbbbbbbbbbb\n\nccccccccccccccc\n\nddddddddddddddd";
        let segments = split_text_with(text, Some("g"), &small_limits());
        let contents: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![
                "aaaaaaaaaaaaaaa\n\nbbbbbbbbbbbbbbb",
                "ccccccccccccccc\n\nddddddddddddddd"
            ]
        );
    }

    #[test]
    fn test_buffer_below_min_grows_past_max() {
        let limits = SplitLimits::new(20, 10).unwrap();
        // First paragraph (8) is under min, so the second (15) is appended
        // even though 8 + 2 + 15 > 20.
        let text = "aaaaaaaa\n\nbbbbbbbbbbbbbbb\n\ncc";
        let segments = split_text_with(text, Some("g"), &limits);
        assert_eq!(segments[0].content, "aaaaaaaa\n\nbbbbbbbbbbbbbbb");
        assert_eq!(segments[1].content, "cc");
    }

    #[test]
    fn test_blank_lines_with_whitespace_separate_paragraphs() {
        assert_eq!(
            paragraphs("one\n   \ntwo\nstill two\n\n\nthree"),
            vec!["one", "two\nstill two", "three"]
        );
    }

    #[test]
    fn test_sentence_boundaries() {
        assert_eq!(
            sentences("First one. Second! Third? v1.2 stays.\nLast"),
            vec!["First one.", "Second!", "Third?", "v1.2 stays.", "Last"]
        );
    }

    #[test]
    fn test_oversized_paragraph_falls_to_sentences() {
        let text = "Short intro.\n\nThe first sentence is here. The second sentence is here. The third one too.";
        let segments = split_text_with(text, Some("g"), &small_limits());
        assert_eq!(segments[0].content, "Short intro.");
        assert!(segments.len() >= 3);
        for s in &segments {
            assert!(s.content.chars().count() <= 40 + 12, "{:?}", s.content);
        }
    }

    #[test]
    fn test_oversized_sentence_falls_to_words() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
        let limits = SplitLimits::new(20, 15).unwrap();
        let segments = split_text_with(text, Some("g"), &limits);
        assert!(segments.len() > 1);
        for s in &segments {
            assert!(s.content.chars().count() <= 20, "{:?}", s.content);
        }
        let rejoined: Vec<&str> = segments
            .iter()
            .flat_map(|s| s.content.split_whitespace())
            .collect();
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn test_whitespace_only_long_text() {
        let text = " ".repeat(DEFAULT_MAX_CHARS + 1);
        let segments = split_text(&text, Some("g"));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "");
    }

    #[test]
    fn test_limits_rejected_unless_min_below_max() {
        assert_eq!(SplitLimits::new(0, 0), Err(LimitsError::ZeroMax));
        assert_eq!(
            SplitLimits::new(100, 100),
            Err(LimitsError::MinNotBelowMax {
                min_chars: 100,
                max_chars: 100
            })
        );
        assert!(SplitLimits::new(1, 0).is_ok());
    }

    #[test]
    fn test_smallest_limits_still_bound_every_segment() {
        let limits = SplitLimits::new(1, 0).unwrap();
        let segments = split_text_with("ab cd", Some("g"), &limits);
        let contents: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_hard_split_respects_char_boundaries() {
        assert_eq!(hard_split("ééééé", 2), vec!["éé", "éé", "é"]);
        assert_eq!(hard_split("abcd", 2), vec!["ab", "cd"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Alpha beta. ".repeat(2000);
        let a = split_text(&text, Some("g"));
        let b = split_text(&text, Some("g"));
        assert_eq!(a, b);
    }
}
