//! Text-level playlist normalization
//!
//! Fetched fragments are never parsed into a structured model; normalization
//! edits lines in place. Tagging walks EXTINF lines one at a time and touches
//! only the attribute section, so channel names that happen to contain
//! attribute-like text pass through untouched.

const HEADER: &str = "#EXTM3U";
const EXTINF: &str = "#EXTINF:";
const GROUP_ATTR: &str = "group-title=\"";

/// Drop a leading `#EXTM3U` header line, if present
///
/// Fragments arrive with their own header; only the merged document may
/// carry one.
pub fn strip_header(text: &str) -> &str {
    if !text.starts_with(HEADER) {
        return text;
    }
    match text.find('\n') {
        Some(pos) => &text[pos + 1..],
        None => "",
    }
}

/// Tag every entry in a playlist fragment with a group label
///
/// An existing `group-title` value is replaced with the label, the original
/// value kept as a `tvg-group` attribute. Entries without the attribute get
/// it inserted after the duration token. Non-EXTINF lines and the trailing
/// newline are preserved as-is.
pub fn tag_group(text: &str, label: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.starts_with(EXTINF) {
            out.push(tag_extinf_line(line, label));
        } else {
            out.push(line.to_string());
        }
    }
    let mut tagged = out.join("\n");
    if text.ends_with('\n') && !tagged.is_empty() {
        tagged.push('\n');
    }
    tagged
}

fn tag_extinf_line(line: &str, label: &str) -> String {
    let rest = &line[EXTINF.len()..];

    // The channel name starts at the first comma outside quotes; only the
    // attribute section before it gets edited.
    let name_start = unquoted_comma(rest).unwrap_or(rest.len());
    let (head, name) = rest.split_at(name_start);

    if let Some(attr_start) = head.find(GROUP_ATTR) {
        let value_start = attr_start + GROUP_ATTR.len();
        match head[value_start..].find('"') {
            Some(value_len) => {
                let original = &head[value_start..value_start + value_len];
                let after = &head[value_start + value_len + 1..];
                format!(
                    "{}{}group-title=\"{}\" tvg-group=\"{}\"{}{}",
                    EXTINF,
                    &head[..attr_start],
                    label,
                    original,
                    after,
                    name
                )
            }
            // Unterminated quote; leave the line alone rather than guess
            None => line.to_string(),
        }
    } else {
        let duration_end = head.find(' ').unwrap_or(head.len());
        let (duration, tail) = head.split_at(duration_end);
        format!(
            "{}{} group-title=\"{}\"{}{}",
            EXTINF, duration, label, tail, name
        )
    }
}

fn unquoted_comma(s: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}
