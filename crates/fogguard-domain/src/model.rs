/// One proposed action, as submitted by a simulated agent.
///
/// Built fresh per evaluation and owned by the caller; the engine only borrows it.
/// `Default` is the zero-valued request, which every policy denies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    /// Declared purpose category of the action.
    pub intent: String,
    /// Target network domain.
    pub domain: String,
    /// Remaining propagation hops.
    pub ttl: i64,
    /// Child actions/agents this action would spawn.
    pub children: i64,
    /// Concurrent operations this action requires.
    pub concurrency: i64,
    /// Requested rate in actions per minute.
    pub rate: f64,
    /// Opaque content carried by the action.
    pub payload: Option<String>,
    /// Caller's attestation that it paused for review first.
    pub pause_before_propagate: bool,
}

impl Request {
    /// The payload, if it has anything worth inspecting.
    ///
    /// Absent, empty, and whitespace-only payloads all count as nothing.
    pub fn inspectable_payload(&self) -> Option<&str> {
        self.payload.as_deref().filter(|p| !p.trim().is_empty())
    }
}
