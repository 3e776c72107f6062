//! Part-suffix convention for segment titles.
//!
//! When a memory spans several segments, rows after the first store the
//! title as `"<title> (Part i/n)"`. Reads strip the suffix again so the
//! reassembled memory shows the plain title.

/// Title stored on the row at `position` of a `count`-segment group.
pub fn part_title(title: &str, position: u32, count: u32) -> String {
    if count > 1 && position > 1 {
        format!("{} (Part {}/{})", title, position, count)
    } else {
        title.to_string()
    }
}

/// Remove one trailing `" (Part i/n)"` marker, if present.
///
/// ```rust
/// use keepsake_core::title::strip_part_suffix;
///
/// assert_eq!(strip_part_suffix("Summer trip (Part 2/5)"), "Summer trip");
/// assert_eq!(strip_part_suffix("Summer trip"), "Summer trip");
/// ```
pub fn strip_part_suffix(title: &str) -> &str {
    let Some(open) = title.rfind(" (") else {
        return title;
    };
    let Some(inner) = title[open + 2..].strip_suffix(')') else {
        return title;
    };
    let Some(label) = inner.get(..5) else {
        return title;
    };
    if !label.eq_ignore_ascii_case("part ") {
        return title;
    }
    let Some((index, total)) = inner[5..].split_once('/') else {
        return title;
    };
    if is_number(index) && is_number(total) {
        &title[..open]
    } else {
        title
    }
}

/// Title shown for a memory: stripped only when the group has several segments.
pub fn logical_title(title: &str, segment_count: u32) -> &str {
    if segment_count > 1 {
        strip_part_suffix(title)
    } else {
        title
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
