use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::view_model::{AppViewModel, ResultsView, SuggestionRowView, TableBodyView, TableViewModel};

pub type RequestId = u64;

pub const MISSING_INPUT_MESSAGE: &str = "Please provide a username";
pub const LOOKUP_FAILURE_PREFIX: &str = "An error was encountered in retrieving this user's data.";
pub const DESTINATION_BASE: &str = "https://reddit.com/r/";
pub const FADE_IN: Duration = Duration::from_millis(1000);

/// Everything outside the RFC 3986 unreserved set is escaped in the
/// destination segment, so quotes cannot end the `window.open` literal.
const CATEGORY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One ranked result as delivered by the lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionEntry {
    pub category: String,
    pub confidence: f64,
    pub popularity: f64,
}

impl SuggestionEntry {
    pub fn new(category: impl Into<String>, confidence: f64, popularity: f64) -> Self {
        Self {
            category: category.into(),
            confidence,
            popularity,
        }
    }

    pub fn destination(&self) -> String {
        format!(
            "{DESTINATION_BASE}{}",
            utf8_percent_encode(&self.category, CATEGORY_SEGMENT)
        )
    }
}

/// How a lookup ended, as seen by the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Response carried `data` (possibly empty).
    Success(Vec<SuggestionEntry>),
    /// Response had no `data`; `message` is whatever the service supplied.
    Failure { message: Option<String> },
    /// The request never produced a usable response.
    NetworkFailure,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum PanelView {
    #[default]
    Empty,
    Message(String),
    Table(TableState),
}

#[derive(Debug, Clone, PartialEq)]
struct TableState {
    body: TableBody,
    fade_elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
enum TableBody {
    Loading,
    Rows(Vec<SuggestionEntry>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    view: PanelView,
    last_issued: RequestId,
    pending: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            results: self.results_view(),
            pending_request: self.pending,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn results_view(&self) -> ResultsView {
        match &self.view {
            PanelView::Empty => ResultsView::Empty,
            PanelView::Message(text) => ResultsView::Message(text.clone()),
            PanelView::Table(table) => ResultsView::Table(TableViewModel {
                opacity: fade_opacity(table.fade_elapsed),
                body: match &table.body {
                    TableBody::Loading => TableBodyView::Loading,
                    TableBody::Rows(entries) => TableBodyView::Rows(
                        entries
                            .iter()
                            .enumerate()
                            .map(|(i, entry)| SuggestionRowView {
                                rank: i + 1,
                                popularity: entry.popularity,
                                category: entry.category.clone(),
                                confidence: entry.confidence,
                                destination: entry.destination(),
                            })
                            .collect(),
                    ),
                },
            }),
        }
    }

    /// Tears down the current view and shows `text`. Any in-flight request
    /// becomes stale.
    pub(crate) fn show_message(&mut self, text: String) {
        self.pending = None;
        self.view = PanelView::Message(text);
        self.dirty = true;
    }

    /// Tears down the current view, mounts a loading table and issues a new
    /// request token.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_issued += 1;
        self.pending = Some(self.last_issued);
        self.view = PanelView::Table(TableState {
            body: TableBody::Loading,
            fade_elapsed: Duration::ZERO,
        });
        self.dirty = true;
        self.last_issued
    }

    pub(crate) fn is_current(&self, request_id: RequestId) -> bool {
        self.pending == Some(request_id)
    }

    pub(crate) fn resolve(&mut self, outcome: LookupOutcome) {
        self.pending = None;
        match outcome {
            LookupOutcome::Success(entries) => {
                let fade_elapsed = match &self.view {
                    PanelView::Table(table) => table.fade_elapsed,
                    _ => Duration::ZERO,
                };
                self.view = PanelView::Table(TableState {
                    body: TableBody::Rows(entries),
                    fade_elapsed,
                });
            }
            LookupOutcome::Failure { message } => {
                self.view = PanelView::Message(failure_message(message.as_deref()));
            }
            LookupOutcome::NetworkFailure => {
                self.view = PanelView::Message(failure_message(None));
            }
        }
        self.dirty = true;
    }

    /// Advances the table fade-in; marks dirty only while the fade is running.
    pub(crate) fn advance_fade(&mut self, elapsed: Duration) {
        if let PanelView::Table(table) = &mut self.view {
            if table.fade_elapsed < FADE_IN && !elapsed.is_zero() {
                table.fade_elapsed = (table.fade_elapsed + elapsed).min(FADE_IN);
                self.dirty = true;
            }
        }
    }
}

/// Fixed prefix, plus the service message when it supplied a non-empty one.
pub fn failure_message(message: Option<&str>) -> String {
    match message.filter(|m| !m.is_empty()) {
        Some(message) => format!("{LOOKUP_FAILURE_PREFIX} {message}"),
        None => LOOKUP_FAILURE_PREFIX.to_string(),
    }
}

fn fade_opacity(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() / FADE_IN.as_secs_f64()).clamp(0.0, 1.0)
}
