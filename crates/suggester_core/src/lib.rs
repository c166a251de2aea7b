//! Suggester core: pure panel state machine, view model, DOM rendering and
//! the ambient particle animation.
mod ambient;
mod dom;
mod effect;
mod msg;
mod render;
mod state;
mod update;
mod view_model;

pub use ambient::{
    AdvanceReport, AmbientAnimator, AnimatorSettings, CanvasBounds, Particle, ParticleFrame,
    ParticleId, BASE_SIZE_PX, CANVAS_ID, MIN_SIZE_FACTOR, OPACITY_SCALE, PARTICLE_ASSET,
    PARTICLE_CLASS, PARTICLE_LIFETIME, RISE_PX, ROTATION_ADVANCE_DEG, SPAWN_INTERVAL,
    SPAWN_OFFSET_PX,
};
pub use dom::{Element, Mount};
pub use effect::Effect;
pub use msg::Msg;
pub use render::{render_results, LOADING_TEXT, MESSAGE_ID, TABLE_ID};
pub use state::{
    failure_message, AppState, LookupOutcome, RequestId, SuggestionEntry, DESTINATION_BASE,
    FADE_IN, LOOKUP_FAILURE_PREFIX, MISSING_INPUT_MESSAGE,
};
pub use update::update;
pub use view_model::{
    AppViewModel, ResultsView, SuggestionRowView, TableBodyView, TableViewModel, TABLE_HEADERS,
};
