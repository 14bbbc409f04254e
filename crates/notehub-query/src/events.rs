//! Change notification events for query and mutation consumers.
//!
//! Both buses use `tokio::sync::broadcast`; subscribers that fall behind
//! receive `Lagged` and miss events, which is acceptable because every
//! event only means "re-read the relevant snapshot".

use crate::key::QueryKey;

/// Emitted by the query cache whenever an entry changes.
#[derive(Debug, Clone)]
pub enum QueryEvent {
    /// A fetch resolved successfully and the entry now holds fresh data.
    Updated { key: QueryKey },
    /// A fetch failed and the entry now holds the error.
    Failed { key: QueryKey },
    /// Every entry was marked stale; observed keys are being refetched.
    Invalidated,
}

impl QueryEvent {
    /// Stable event name for logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            QueryEvent::Updated { .. } => "Updated",
            QueryEvent::Failed { .. } => "Failed",
            QueryEvent::Invalidated => "Invalidated",
        }
    }
}

/// Emitted by the mutation coordinator after a mutation settles.
#[derive(Debug, Clone)]
pub enum MutationEvent {
    /// A note was created; the cache has already been invalidated.
    Created { id: String },
    /// A note was deleted; the cache has already been invalidated.
    Deleted { id: String },
    /// A delete failed; `message` is the display form of the error.
    DeleteFailed { id: String, message: String },
}

impl MutationEvent {
    /// Stable event name for logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            MutationEvent::Created { .. } => "Created",
            MutationEvent::Deleted { .. } => "Deleted",
            MutationEvent::DeleteFailed { .. } => "DeleteFailed",
        }
    }

    /// The note id this event concerns.
    pub fn note_id(&self) -> &str {
        match self {
            MutationEvent::Created { id }
            | MutationEvent::Deleted { id }
            | MutationEvent::DeleteFailed { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_names() {
        let key = QueryKey::new(1, 12, "");
        assert_eq!(QueryEvent::Updated { key: key.clone() }.event_type(), "Updated");
        assert_eq!(QueryEvent::Failed { key }.event_type(), "Failed");
        assert_eq!(QueryEvent::Invalidated.event_type(), "Invalidated");
    }

    #[test]
    fn mutation_event_note_id() {
        let event = MutationEvent::DeleteFailed {
            id: "n1".into(),
            message: "Network error: down".into(),
        };
        assert_eq!(event.event_type(), "DeleteFailed");
        assert_eq!(event.note_id(), "n1");
    }
}
