use crate::state::MISSING_INPUT_MESSAGE;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SuggestionsRequested { identifier } => {
            match identifier.filter(|identifier| !identifier.is_empty()) {
                None => {
                    state.show_message(MISSING_INPUT_MESSAGE.to_string());
                    Vec::new()
                }
                Some(identifier) => {
                    let request_id = state.begin_request();
                    vec![Effect::Lookup {
                        request_id,
                        identifier,
                    }]
                }
            }
        }
        Msg::LookupResolved {
            request_id,
            outcome,
        } => {
            // Only the latest request may touch the view; older ones are dropped.
            if state.is_current(request_id) {
                state.resolve(outcome);
            }
            Vec::new()
        }
        Msg::Tick { elapsed } => {
            state.advance_fade(elapsed);
            Vec::new()
        }
    };

    (state, effects)
}
