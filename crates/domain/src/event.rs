use std::{
    collections::HashSet,
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;
use cqrs_es::{Aggregate, DomainEvent as _, EventEnvelope, Query};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Aggregate-agnostic envelope of a committed event
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct DomainEvent {
    pub id: String,
    pub aggregate_type: String,
    pub sequence: usize,
    pub event_type: String,
    pub event_version: String,
    pub payload: String,  // JSON
    pub metadata: String, // JSON
}

impl DomainEvent {
    pub fn from_envelope<A: Aggregate>(envelope: &EventEnvelope<A>) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            envelope.aggregate_id.clone(),
            A::aggregate_type(),
            envelope.sequence,
            envelope.payload.event_type(),
            envelope.payload.event_version(),
            serde_json::to_string(&envelope.payload)?,
            serde_json::to_string(&envelope.metadata)?,
        ))
    }
}

/// Append-only in-memory log fed by every CQRS framework it is registered with
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl EventLog {
    pub fn all(&self) -> Vec<DomainEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn for_aggregate(&self, id: &str) -> Vec<DomainEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| event.id == id)
            .cloned()
            .collect()
    }

    /// Events of the given aggregates, in commit order
    pub fn for_aggregates(&self, ids: &HashSet<String>) -> Vec<DomainEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| ids.contains(&event.id))
            .cloned()
            .collect()
    }

    fn push(&self, event: DomainEvent) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[async_trait]
impl<A: Aggregate> Query<A> for EventLog {
    async fn dispatch(&self, aggregate_id: &str, events: &[EventEnvelope<A>]) {
        for envelope in events {
            match DomainEvent::from_envelope(envelope) {
                Ok(event) => {
                    tracing::info!("Publishing {} for {}", event.event_type, event.id);
                    self.push(event);
                }
                Err(e) => tracing::error!("Failed to record event for {}: {}", aggregate_id, e),
            }
        }
    }
}
