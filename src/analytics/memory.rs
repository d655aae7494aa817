use std::sync::Mutex;

use super::{AnalyticsClient, Properties};

/// One call as seen by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Capture {
        distinct_id: String,
        event: String,
        properties: Properties,
    },
    Identify {
        distinct_id: String,
        anon_distinct_id: String,
        traits: Properties,
    },
    Reset {
        distinct_id: String,
    },
    PeopleSet {
        distinct_id: String,
        properties: Properties,
    },
}

/// Deterministic in-memory client for tests and local runs.
#[derive(Default)]
pub struct MemoryAnalytics {
    calls: Mutex<Vec<RecordedCall>>,
}

impl MemoryAnalytics {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Properties of every capture named `event`, in call order.
    pub fn captured(&self, event: &str) -> Vec<Properties> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Capture {
                    event: e,
                    properties,
                    ..
                } if e == event => Some(properties),
                _ => None,
            })
            .collect()
    }

    /// `(distinct_id, traits)` of every identify call.
    pub fn identified(&self) -> Vec<(String, Properties)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Identify {
                    distinct_id,
                    traits,
                    ..
                } => Some((distinct_id, traits)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut c) = self.calls.lock() {
            c.clear();
        }
    }

    fn push(&self, call: RecordedCall) {
        if let Ok(mut c) = self.calls.lock() {
            c.push(call);
        }
    }
}

impl AnalyticsClient for MemoryAnalytics {
    fn capture(&self, distinct_id: &str, event: &str, properties: Properties) {
        self.push(RecordedCall::Capture {
            distinct_id: distinct_id.to_string(),
            event: event.to_string(),
            properties,
        });
    }

    fn identify(&self, distinct_id: &str, anon_distinct_id: &str, traits: Properties) {
        self.push(RecordedCall::Identify {
            distinct_id: distinct_id.to_string(),
            anon_distinct_id: anon_distinct_id.to_string(),
            traits,
        });
    }

    fn reset(&self, distinct_id: &str) {
        self.push(RecordedCall::Reset {
            distinct_id: distinct_id.to_string(),
        });
    }

    fn people_set(&self, distinct_id: &str, properties: Properties) {
        self.push(RecordedCall::PeopleSet {
            distinct_id: distinct_id.to_string(),
            properties,
        });
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
