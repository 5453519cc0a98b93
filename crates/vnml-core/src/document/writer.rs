//! Rendering of the in-memory model back to VNml text.

use super::{Section, VERSION_BANNERS};

/// Renders sections into the on-disk line format.
///
/// The newest recognized banner goes first, then each section: its
/// comments, the name line, the value lines with their comments, and a
/// blank separator line.
pub(super) fn render(sections: &[Section]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(VERSION_BANNERS.last().copied().unwrap_or_default().to_string());

    for section in sections {
        for comment in &section.comments {
            lines.push(format!(";{comment}"));
        }
        lines.push(section.name.clone());
        for entry in &section.values {
            for comment in &entry.comments {
                lines.push(format!("\t;{comment}"));
            }
            lines.push(format!("\t{}=[{}]", entry.key, entry.value));
        }
        lines.push(String::new());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
