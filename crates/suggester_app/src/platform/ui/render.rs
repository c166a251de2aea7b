//! Plain-text rendering of the mounted results subtree.

use suggester_core::{Element, LOADING_TEXT, MESSAGE_ID};

/// Describes the mounted subtree as terminal text: the message as-is, or the
/// table as aligned columns read back from its `th`/`td` cells.
pub fn describe(mounted: Option<&Element>) -> String {
    let Some(root) = mounted else {
        return String::new();
    };
    if root.id() == Some(MESSAGE_ID) {
        return root.text_content();
    }

    let rows: Vec<Vec<String>> = root
        .find_all_by_tag("tr")
        .into_iter()
        .map(|tr| {
            tr.children()
                .iter()
                .filter(|cell| matches!(cell.tag(), "th" | "td"))
                .map(Element::text_content)
                .collect()
        })
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines: Vec<String> = rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect();

    if root.find_by_class("loading-message").is_some() {
        lines.push(LOADING_TEXT.to_string());
    }
    lines.join("\n")
}
