//! Content lifecycle events.
//!
//! The service publishes an event after a successful mutation. Subscribers
//! run synchronously in registration order; a failing subscriber is logged
//! and skipped.

use ink_core::{ContentError, ContentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    Updated { id: ContentId, title: String },
}

impl ContentEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "content_updated",
        }
    }
}

pub trait ContentSubscriber: Send + Sync {
    /// # Errors
    ///
    /// A returned error is logged by the publisher and otherwise ignored.
    fn on_event(&self, event: &ContentEvent) -> Result<(), ContentError>;
}

/// Logs a status line for every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusLogSubscriber;

impl ContentSubscriber for StatusLogSubscriber {
    fn on_event(&self, event: &ContentEvent) -> Result<(), ContentError> {
        match event {
            ContentEvent::Updated { id, title } => {
                tracing::info!(id, title = %title, "content updated: {title}");
            }
        }
        Ok(())
    }
}

/// Deliver `event` to every subscriber.
pub(crate) fn publish(subscribers: &[std::sync::Arc<dyn ContentSubscriber>], event: &ContentEvent) {
    for subscriber in subscribers {
        if let Err(e) = subscriber.on_event(event) {
            tracing::warn!(event = event.name(), %e, "content subscriber failed");
        }
    }
}
