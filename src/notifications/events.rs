use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// State changes published by pagination controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PaginationEvent {
    PageChanged {
        view: String,
        from: usize,
        to: usize,
        total_pages: usize,
    },
    LimitChanged {
        view: String,
        from: usize,
        to: usize,
    },
    ItemsChanged {
        view: String,
        total_items: usize,
        current_page: usize,
    },
}

impl PaginationEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            PaginationEvent::PageChanged { .. } => "page_changed",
            PaginationEvent::LimitChanged { .. } => "limit_changed",
            PaginationEvent::ItemsChanged { .. } => "items_changed",
        }
    }

    pub fn view(&self) -> &str {
        match self {
            PaginationEvent::PageChanged { view, .. }
            | PaginationEvent::LimitChanged { view, .. }
            | PaginationEvent::ItemsChanged { view, .. } => view,
        }
    }
}

/// Envelope carrying an event and its process-wide publish sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventMessage {
    pub sequence: u64,
    #[serde(flatten)]
    pub event: PaginationEvent,
}

impl EventMessage {
    pub fn new(event: PaginationEvent) -> Self {
        Self {
            sequence: SEQUENCE.fetch_add(1, Ordering::SeqCst),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = PaginationEvent::LimitChanged {
            view: "employees".to_string(),
            from: 10,
            to: 25,
        };
        let value = serde_json::to_value(EventMessage::new(event)).unwrap();
        assert_eq!(value["type"], "limit_changed");
        assert_eq!(value["data"]["view"], "employees");
        assert_eq!(value["data"]["to"], 25);
        assert!(value["sequence"].is_number());
    }

    #[test]
    fn test_sequence_is_increasing() {
        let event = PaginationEvent::ItemsChanged {
            view: "invoices".to_string(),
            total_items: 3,
            current_page: 1,
        };
        let first = EventMessage::new(event.clone());
        let second = EventMessage::new(event);
        assert!(second.sequence > first.sequence);
        assert_eq!(first.event.view(), "invoices");
        assert_eq!(first.event.event_type(), "items_changed");
    }
}
