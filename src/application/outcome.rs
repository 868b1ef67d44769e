//! Terminal outcome of processing one inbound event.

use serde::Serialize;

/// What the engine did with the event. Exactly one outcome is produced
/// per event; the HTTP layer maps it to a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileOutcome {
    Created,
    Updated,
    Cancelled,
    Noop,
}

/// Outcome plus a human-readable detail line for response bodies and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub outcome: ReconcileOutcome,
    pub detail: String,
}

impl ReconcileReport {
    pub fn new(outcome: ReconcileOutcome, detail: impl Into<String>) -> Self {
        Self {
            outcome,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase_outcome() {
        let report = ReconcileReport::new(ReconcileOutcome::Created, "membership created");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "created");
        assert_eq!(json["detail"], "membership created");
    }
}
