//! Builds the results-area subtree from a [`ResultsView`].

use crate::dom::{format_number, Element};
use crate::view_model::{ResultsView, SuggestionRowView, TableBodyView, TableViewModel, TABLE_HEADERS};

pub const TABLE_ID: &str = "suggestion-table";
pub const MESSAGE_ID: &str = "suggestion-message";
pub const LOADING_TEXT: &str = "loading";

/// Produces the complete subtree for the results area, or `None` when it is
/// empty. Callers swap the result into their mount wholesale.
pub fn render_results(view: &ResultsView) -> Option<Element> {
    match view {
        ResultsView::Empty => None,
        ResultsView::Message(text) => Some(Element::new("div").with_id(MESSAGE_ID).with_text(text)),
        ResultsView::Table(table) => Some(render_table(table)),
    }
}

fn render_table(table: &TableViewModel) -> Element {
    let header_row = Element::new("tr").with_children(
        TABLE_HEADERS
            .iter()
            .map(|label| Element::new("th").with_text(*label)),
    );
    let header = Element::new("div").with_class("tbl-header").with_child(
        Element::new("table").with_child(Element::new("thead").with_child(header_row)),
    );

    let content_table = match &table.body {
        TableBodyView::Loading => Element::new("table").with_child(
            Element::new("div")
                .with_class("loading-message")
                .with_text(LOADING_TEXT),
        ),
        TableBodyView::Rows(rows) => Element::new("table")
            .with_child(Element::new("tbody").with_children(rows.iter().map(render_row))),
    };
    let content = Element::new("div")
        .with_class("tbl-content")
        .with_child(content_table);

    Element::new("div")
        .with_id(TABLE_ID)
        .with_style("opacity", format_number(table.opacity))
        .with_child(header)
        .with_child(content)
}

fn render_row(row: &SuggestionRowView) -> Element {
    Element::new("tr")
        .with_attr("onclick", format!("window.open('{}')", row.destination))
        .with_children(row.cells().into_iter().map(|cell| Element::new("td").with_text(cell)))
}
