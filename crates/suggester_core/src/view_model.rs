use crate::RequestId;

/// Header labels of the suggestion table, left to right.
pub const TABLE_HEADERS: [&str; 4] = ["", "Popularity", "Subreddit", "Confidence"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub results: ResultsView,
    pub pending_request: Option<RequestId>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }
}

/// What the results area currently shows. At most one of table or message.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsView {
    #[default]
    Empty,
    Message(String),
    Table(TableViewModel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    /// Fade-in progress in [0, 1].
    pub opacity: f64,
    pub body: TableBodyView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBodyView {
    Loading,
    Rows(Vec<SuggestionRowView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRowView {
    /// 1-based position in the response.
    pub rank: usize,
    pub popularity: f64,
    pub category: String,
    pub confidence: f64,
    pub destination: String,
}

impl SuggestionRowView {
    /// Cell texts in header order: rank, popularity, category, confidence.
    pub fn cells(&self) -> [String; 4] {
        [
            self.rank.to_string(),
            self.popularity.to_string(),
            self.category.clone(),
            self.confidence.to_string(),
        ]
    }
}
