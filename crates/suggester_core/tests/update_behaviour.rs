use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use suggester_core::{
    render_results, update, AppState, Effect, LookupOutcome, Msg, RequestId, ResultsView,
    SuggestionEntry, TableBodyView, LOOKUP_FAILURE_PREFIX, MISSING_INPUT_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(suggester_logging::initialize_for_tests);
}

fn request(state: AppState, identifier: Option<&str>) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SuggestionsRequested {
            identifier: identifier.map(ToOwned::to_owned),
        },
    )
}

fn lookup_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .map(|effect| match effect {
            Effect::Lookup { request_id, .. } => *request_id,
        })
        .next()
        .expect("lookup effect")
}

fn resolve(state: AppState, request_id: RequestId, outcome: LookupOutcome) -> AppState {
    let (state, effects) = update(state, Msg::LookupResolved { request_id, outcome });
    assert!(effects.is_empty());
    state
}

fn alice_entries() -> Vec<SuggestionEntry> {
    vec![
        SuggestionEntry::new("cats", 0.9, 1.0),
        SuggestionEntry::new("dogs", 0.75, 2.0),
    ]
}

#[test]
fn missing_identifier_shows_message_without_lookup() {
    init_logging();
    for identifier in [None, Some("")] {
        let (mut state, effects) = request(AppState::new(), identifier);

        assert!(effects.is_empty());
        assert_eq!(
            state.view().results,
            ResultsView::Message(MISSING_INPUT_MESSAGE.to_string())
        );
        assert!(!state.view().is_loading());
        assert!(state.consume_dirty());
    }
}

#[test]
fn identifier_emits_exactly_one_lookup_and_mounts_loading_table() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("alice"));

    assert_eq!(
        effects,
        vec![Effect::Lookup {
            request_id: 1,
            identifier: "alice".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.is_loading());
    match view.results {
        ResultsView::Table(table) => {
            assert_eq!(table.body, TableBodyView::Loading);
            assert_eq!(table.opacity, 0.0);
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn whitespace_identifier_is_still_looked_up() {
    init_logging();
    let (_state, effects) = request(AppState::new(), Some("  "));
    assert_eq!(effects.len(), 1);
}

#[test]
fn success_builds_rows_in_server_order() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("alice"));
    let state = resolve(state, lookup_id(&effects), LookupOutcome::Success(alice_entries()));

    let view = state.view();
    assert!(!view.is_loading());
    let rows = match view.results {
        ResultsView::Table(table) => match table.body {
            TableBodyView::Rows(rows) => rows,
            other => panic!("expected rows, got {other:?}"),
        },
        other => panic!("expected table, got {other:?}"),
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cells(), ["1", "1", "cats", "0.9"].map(String::from));
    assert_eq!(rows[1].cells(), ["2", "2", "dogs", "0.75"].map(String::from));
    assert_eq!(rows[0].destination, "https://reddit.com/r/cats");
    assert_eq!(rows[1].destination, "https://reddit.com/r/dogs");
}

#[test]
fn empty_success_keeps_table_with_no_rows() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("alice"));
    let state = resolve(state, lookup_id(&effects), LookupOutcome::Success(Vec::new()));

    match state.view().results {
        ResultsView::Table(table) => assert_eq!(table.body, TableBodyView::Rows(Vec::new())),
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn failure_replaces_table_with_message() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("bob"));
    let state = resolve(
        state,
        lookup_id(&effects),
        LookupOutcome::Failure {
            message: Some("user not found".to_string()),
        },
    );

    assert_eq!(
        state.view().results,
        ResultsView::Message(
            "An error was encountered in retrieving this user's data. user not found".to_string()
        )
    );
}

#[test]
fn failure_without_message_shows_prefix_only() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("bob"));
    let state = resolve(state, lookup_id(&effects), LookupOutcome::Failure { message: None });

    assert_eq!(
        state.view().results,
        ResultsView::Message(LOOKUP_FAILURE_PREFIX.to_string())
    );
}

#[test]
fn network_failure_does_not_leave_loading_placeholder() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("carol"));
    let state = resolve(state, lookup_id(&effects), LookupOutcome::NetworkFailure);

    let view = state.view();
    assert!(!view.is_loading());
    assert_eq!(
        view.results,
        ResultsView::Message(LOOKUP_FAILURE_PREFIX.to_string())
    );
}

#[test]
fn stale_response_is_discarded() {
    init_logging();
    let (state, first) = request(AppState::new(), Some("alice"));
    let (state, second) = request(state, Some("bob"));
    let first_id = lookup_id(&first);
    let second_id = lookup_id(&second);
    assert!(second_id > first_id);

    // The newer request resolves first; the older one arriving later must not win.
    let state = resolve(
        state,
        second_id,
        LookupOutcome::Success(vec![SuggestionEntry::new("bobs", 0.5, 9.0)]),
    );
    let mut state = resolve(state, first_id, LookupOutcome::Success(alice_entries()));
    assert!(state.consume_dirty());

    let (expected, effects) = request(AppState::new(), Some("bob"));
    let expected = resolve(
        expected,
        lookup_id(&effects),
        LookupOutcome::Success(vec![SuggestionEntry::new("bobs", 0.5, 9.0)]),
    );
    assert_eq!(
        render_results(&state.view().results),
        render_results(&expected.view().results)
    );
}

#[test]
fn stale_response_alone_does_not_mark_dirty() {
    init_logging();
    let (state, first) = request(AppState::new(), Some("alice"));
    let (mut state, _second) = request(state, Some("bob"));
    assert!(state.consume_dirty());

    let mut state = resolve(state, lookup_id(&first), LookupOutcome::Failure { message: None });
    assert!(!state.consume_dirty());
    assert!(state.view().is_loading());
}

#[test]
fn missing_input_invalidates_in_flight_request() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("alice"));
    let (state, _) = request(state, None);
    let state = resolve(state, lookup_id(&effects), LookupOutcome::Success(alice_entries()));

    assert_eq!(
        state.view().results,
        ResultsView::Message(MISSING_INPUT_MESSAGE.to_string())
    );
}

#[test]
fn duplicate_resolution_is_ignored() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("alice"));
    let id = lookup_id(&effects);
    let state = resolve(state, id, LookupOutcome::Success(alice_entries()));
    let before = state.view();
    let state = resolve(state, id, LookupOutcome::NetworkFailure);
    assert_eq!(state.view().results, before.results);
}

#[test]
fn repeated_submission_renders_the_same_as_one() {
    init_logging();
    let (once, effects) = request(AppState::new(), Some("alice"));
    let once = resolve(once, lookup_id(&effects), LookupOutcome::Success(alice_entries()));

    let (twice, effects) = request(once.clone(), Some("alice"));
    let twice = resolve(twice, lookup_id(&effects), LookupOutcome::Success(alice_entries()));

    assert_eq!(
        render_results(&once.view().results),
        render_results(&twice.view().results)
    );
}

#[test]
fn new_submission_replaces_previous_message() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("bob"));
    let state = resolve(state, lookup_id(&effects), LookupOutcome::Failure { message: None });
    let (state, _) = request(state, Some("alice"));

    assert!(matches!(state.view().results, ResultsView::Table(_)));
}

#[test]
fn tick_fades_table_in_and_stops_marking_dirty() {
    init_logging();
    let (mut state, _) = request(AppState::new(), Some("alice"));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::Tick { elapsed: Duration::from_millis(250) });
    assert!(state.consume_dirty());
    match state.view().results {
        ResultsView::Table(table) => assert_eq!(table.opacity, 0.25),
        other => panic!("expected table, got {other:?}"),
    }

    let (mut state, _) = update(state, Msg::Tick { elapsed: Duration::from_secs(2) });
    assert!(state.consume_dirty());
    let (mut state, _) = update(state, Msg::Tick { elapsed: Duration::from_millis(50) });
    assert!(!state.consume_dirty());
    match state.view().results {
        ResultsView::Table(table) => assert_eq!(table.opacity, 1.0),
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn fade_progress_survives_resolution() {
    init_logging();
    let (state, effects) = request(AppState::new(), Some("alice"));
    let (state, _) = update(state, Msg::Tick { elapsed: Duration::from_millis(500) });
    let state = resolve(state, lookup_id(&effects), LookupOutcome::Success(alice_entries()));

    match state.view().results {
        ResultsView::Table(table) => assert_eq!(table.opacity, 0.5),
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn tick_without_table_is_quiet() {
    init_logging();
    let (mut state, _) = request(AppState::new(), None);
    assert!(state.consume_dirty());
    let (mut state, effects) = update(state, Msg::Tick { elapsed: Duration::from_millis(100) });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}
