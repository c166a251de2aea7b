use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted an identifier; `None` when the input was absent.
    SuggestionsRequested { identifier: Option<String> },
    /// The lookup issued for `request_id` finished.
    LookupResolved {
        request_id: crate::RequestId,
        outcome: crate::LookupOutcome,
    },
    /// Host clock advanced by `elapsed` since the previous tick.
    Tick { elapsed: Duration },
}
