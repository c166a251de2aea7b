//! Suggester engine: lookup IO and background effect execution.
mod engine;
mod lookup;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use lookup::{lookup_url, LookupService, LookupSettings, ReqwestLookupService, LOOKUP_PATH};
pub use types::{
    EngineEvent, FailureKind, LookupError, LookupReply, LookupResponse, RequestId,
    SuggestionRecord,
};
