//! Reassembly of segments into one text.
//!
//! Segments are joined with a blank line whatever tier produced them, so a
//! text split at sentence or word level comes back with the same words in
//! the same order but not byte-identical whitespace.

use crate::models::Segment;
use crate::validate::validate;

const JOINER: &str = "\n\n";

/// Best-effort reconstruction, tagged with whether the group was sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconstruction {
    Complete(String),
    /// The text was rebuilt from whatever segments exist.
    Degraded { text: String, issues: Vec<String> },
}

impl Reconstruction {
    pub fn text(&self) -> &str {
        match self {
            Self::Complete(text) | Self::Degraded { text, .. } => text,
        }
    }

    pub fn issues(&self) -> &[String] {
        match self {
            Self::Complete(_) => &[],
            Self::Degraded { issues, .. } => issues,
        }
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        match self {
            Self::Complete(text) => (text, Vec::new()),
            Self::Degraded { text, issues } => (text, issues),
        }
    }
}

/// Order `segments` by position and join their content.
///
/// Input order does not matter; ties keep their input order.
pub fn reconstruct(segments: &[Segment]) -> String {
    let mut ordered: Vec<&Segment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.position);
    ordered
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join(JOINER)
}

/// Validate, then reconstruct regardless of the outcome.
pub fn reconstruct_checked(segments: &[Segment]) -> Reconstruction {
    let report = validate(segments);
    let text = reconstruct(segments);
    if report.ok {
        Reconstruction::Complete(text)
    } else {
        Reconstruction::Degraded {
            text,
            issues: report.issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::split_text;

    fn seg(position: u32, count: u32, content: &str) -> Segment {
        Segment {
            group_id: "g".to_string(),
            position,
            segment_count: count,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_sorts_by_position() {
        let segments = vec![seg(3, 3, "c"), seg(1, 3, "a"), seg(2, 3, "b")];
        assert_eq!(reconstruct(&segments), "a\n\nb\n\nc");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(reconstruct(&[]), "");
    }

    #[test]
    fn test_single_segment_round_trip() {
        let text = "  keep my whitespace \n";
        assert_eq!(reconstruct(&split_text(text, None)), text);
    }

    #[test]
    fn test_paragraph_split_round_trips_exactly() {
        let text = (0..600)
            .map(|i| format!("Paragraph number {} has some words in it.", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        assert_eq!(reconstruct(&split_text(&text, None)), text);
    }

    #[test]
    fn test_checked_complete() {
        let segments = vec![seg(1, 2, "a"), seg(2, 2, "b")];
        assert_eq!(
            reconstruct_checked(&segments),
            Reconstruction::Complete("a\n\nb".to_string())
        );
    }

    #[test]
    fn test_checked_degraded_keeps_text() {
        let segments = vec![seg(1, 3, "a"), seg(3, 3, "c")];
        let result = reconstruct_checked(&segments);
        assert_eq!(result.text(), "a\n\nc");
        assert!(result.issues().contains(&"missing position 2".to_string()));
        assert!(matches!(result, Reconstruction::Degraded { .. }));
    }
}
