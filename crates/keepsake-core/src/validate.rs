//! Advisory integrity checks over a segment set.
//!
//! Every check runs; none short-circuits. The result is a report, never an
//! error, so callers decide how loudly to complain.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::Segment;

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub issues: Vec<String>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            ok: issues.is_empty(),
            issues,
        }
    }
}

/// Check that `segments` form one complete, consistently labelled group.
///
/// The declared count is taken from the first segment.
///
/// ```rust
/// use keepsake_core::{split_text, validate};
///
/// let segments = split_text(&"word ".repeat(5000), None);
/// assert!(validate(&segments).ok);
/// assert!(!validate(&segments[1..]).ok);
/// ```
pub fn validate(segments: &[Segment]) -> ValidationReport {
    let Some(first) = segments.first() else {
        return ValidationReport::from_issues(vec!["no segments provided".to_string()]);
    };

    let mut issues = Vec::new();

    let group_ids: BTreeSet<&str> = segments.iter().map(|s| s.group_id.as_str()).collect();
    if group_ids.len() > 1 {
        issues.push(format!(
            "inconsistent group ids: {}",
            group_ids.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    let counts: BTreeSet<u32> = segments.iter().map(|s| s.segment_count).collect();
    if counts.len() > 1 {
        issues.push(format!(
            "inconsistent segment counts: {}",
            counts
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    let declared = first.segment_count;
    if segments.len() != declared as usize {
        issues.push(format!(
            "expected {} segments, found {}",
            declared,
            segments.len()
        ));
    }

    let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
    for segment in segments {
        *seen.entry(segment.position).or_default() += 1;
    }
    for (&position, &times) in &seen {
        if position == 0 || position > declared {
            issues.push(format!(
                "position {} outside 1..={}",
                position, declared
            ));
        }
        if times > 1 {
            issues.push(format!("duplicate position {} ({} times)", position, times));
        }
    }
    for position in 1..=declared {
        if !seen.contains_key(&position) {
            issues.push(format!("missing position {}", position));
        }
    }

    ValidationReport::from_issues(issues)
}
