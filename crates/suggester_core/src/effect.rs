use crate::RequestId;

/// Side effects requested by [`crate::update`]; executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one read request to the lookup service.
    Lookup {
        request_id: RequestId,
        identifier: String,
    },
}
