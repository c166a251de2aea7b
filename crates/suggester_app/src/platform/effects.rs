use suggester_core::{Effect, LookupOutcome, Msg, SuggestionEntry};
use suggester_engine::{EngineError, EngineEvent, EngineHandle, LookupReply, LookupSettings};
use suggester_logging::{suggester_debug, suggester_info, suggester_warn};

/// Executes core effects on the engine and turns engine events back into
/// core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: LookupSettings) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Lookup {
                    request_id,
                    identifier,
                } => {
                    suggester_info!(
                        "Lookup request_id={} identifier_len={} identifier={}",
                        request_id,
                        identifier.len(),
                        identifier
                    );
                    self.engine.lookup(request_id, identifier);
                }
            }
        }
    }

    /// Collects every engine event that is ready without blocking.
    pub fn drain(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LookupCompleted { request_id, result } => {
            let outcome = match result {
                Ok(LookupReply::Suggestions(records)) => {
                    suggester_debug!("Lookup {} returned {} entries", request_id, records.len());
                    LookupOutcome::Success(
                        records
                            .into_iter()
                            .map(|record| {
                                SuggestionEntry::new(
                                    record.name(),
                                    record.confidence(),
                                    record.popularity(),
                                )
                            })
                            .collect(),
                    )
                }
                Ok(LookupReply::Rejected { message }) => {
                    suggester_info!("Lookup {} rejected: {:?}", request_id, message);
                    LookupOutcome::Failure { message }
                }
                Err(err) => {
                    suggester_warn!("Lookup {} failed: {}", request_id, err);
                    LookupOutcome::NetworkFailure
                }
            };
            Msg::LookupResolved {
                request_id,
                outcome,
            }
        }
    }
}
