//! Line-oriented parsing of the VNml text format.

use super::{Section, VERSION_BANNERS, ValueEntry};
use crate::error::{Error, Result};

/// Parses `text` and appends its sections to `sections`.
///
/// Pre-existing sections are kept and the duplicate-name check runs
/// against the combined list, which is what lets several files merge
/// into one document.
pub(super) fn parse_into(text: &str, sections: &mut Vec<Section>) -> Result<()> {
    let mut lines = text.lines().enumerate();

    // An empty document has no banner to check.
    let Some((_, first)) = lines.next() else {
        return Ok(());
    };
    if !VERSION_BANNERS.contains(&first) {
        return Err(Error::UnknownVersion(first.to_string()));
    }

    let mut pending_comments: Vec<String> = Vec::new();
    let mut current: Option<usize> = None;

    for (index, line) in lines {
        if let Some(comment) = line.trim_start_matches([' ', '\t']).strip_prefix(';') {
            pending_comments.push(comment.to_string());
            continue;
        }

        // Blank lines separate records but keep pending comments.
        if line.trim_matches([' ', '\t']).is_empty() {
            continue;
        }

        if let Some(raw) = line.strip_prefix('\t') {
            // Value line: key=[value] under the current section.
            let raw = raw.trim_start_matches('\t');
            let Some(section) = current.and_then(|i| sections.get_mut(i)) else {
                return Err(Error::Format {
                    line: index + 1,
                    reason: "value line before any section".into(),
                });
            };
            let Some((key, value)) = raw.split_once('=') else {
                return Err(Error::Format {
                    line: index + 1,
                    reason: "value line without '='".into(),
                });
            };
            let value = value.strip_prefix('[').unwrap_or(value);
            let value = value.strip_suffix(']').unwrap_or(value);
            section.values.push(ValueEntry {
                key: key.to_string(),
                value: value.to_string(),
                comments: std::mem::take(&mut pending_comments),
            });
        } else {
            // Section header, stored verbatim (namespace prefix and all).
            if sections.iter().any(|s| s.name == line) {
                return Err(Error::DuplicateSection(line.to_string()));
            }
            let mut section = Section::new(line);
            section.comments = std::mem::take(&mut pending_comments);
            sections.push(section);
            current = Some(sections.len() - 1);
        }
    }

    Ok(())
}
