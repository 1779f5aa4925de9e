//! Broadcast channel carrying pagination events to subscribers.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

use super::events::{EventMessage, PaginationEvent};

const DEFAULT_CAPACITY: usize = 256;

/// Publishes events synchronously to every live subscriber, in publish order.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns the number of subscribers the event reached.
    pub fn publish(&self, event: PaginationEvent) -> usize {
        let message = EventMessage::new(event);
        debug!(
            "{} on view {:?} (#{})",
            message.event.event_type(),
            message.event.view(),
            message.sequence
        );
        self.sender.send(message).unwrap_or_default()
    }

    /// Subscribes to the events of every view.
    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            view: None,
        }
    }

    /// Subscribes to the events of a single view.
    pub fn subscribe_view(&self, view: impl Into<Arc<str>>) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            view: Some(view.into()),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of the bus, optionally narrowed to one view.
///
/// A subscriber that falls more than the bus capacity behind skips the
/// missed events and resumes with the oldest one still buffered.
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    view: Option<Arc<str>>,
}

impl EventSubscriber {
    fn wants(&self, message: &EventMessage) -> bool {
        self.view
            .as_deref()
            .map_or(true, |view| message.event.view() == view)
    }

    /// Waits for the next event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) if self.wants(&message) => return Some(message),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!("Subscriber lagged, {} events missed", missed)
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) if self.wants(&message) => return Some(message),
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("Subscriber lagged, {} events missed", missed)
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn page_changed(view: &str, to: usize) -> PaginationEvent {
        PaginationEvent::PageChanged {
            view: view.to_string(),
            from: 1,
            to,
            total_pages: 9,
        }
    }

    fn pages(subscriber: &mut EventSubscriber) -> Vec<usize> {
        std::iter::from_fn(|| subscriber.try_recv())
            .map(|message| match message.event {
                PaginationEvent::PageChanged { to, .. } => to,
                other => panic!("unexpected event {:?}", other),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe();

        assert_eq!(bus.publish(page_changed("employees", 2)), 1);

        let received = tokio::time::timeout(Duration::from_millis(100), subscriber.recv())
            .await
            .expect("Timeout")
            .expect("No message");
        assert_eq!(received.event, page_changed("employees", 2));
    }

    #[test]
    fn test_events_arrive_in_publish_order() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        for page in 2..=4 {
            bus.publish(page_changed("employees", page));
        }

        assert_eq!(pages(&mut first), vec![2, 3, 4]);
        assert_eq!(pages(&mut second), vec![2, 3, 4]);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(page_changed("employees", 3)), 0);
    }

    #[test]
    fn test_view_subscriber_only_sees_its_view() {
        let bus = EventBus::new();
        let mut employees = bus.subscribe_view("employees");
        let mut everything = bus.subscribe();

        bus.publish(page_changed("employees", 2));
        bus.publish(page_changed("invoices", 7));
        bus.publish(page_changed("employees", 3));

        assert_eq!(pages(&mut employees), vec![2, 3]);
        assert_eq!(pages(&mut everything), vec![2, 7, 3]);
    }

    #[tokio::test]
    async fn test_view_subscriber_waits_past_other_views() {
        let bus = EventBus::new();
        let mut invoices = bus.subscribe_view("invoices");

        bus.publish(page_changed("employees", 2));
        bus.publish(page_changed("invoices", 4));

        let received = tokio::time::timeout(Duration::from_millis(100), invoices.recv())
            .await
            .expect("Timeout")
            .expect("No message");
        assert_eq!(received.event.view(), "invoices");
    }

    #[test]
    fn test_lagging_subscriber_skips_ahead() {
        let bus = EventBus::with_capacity(2);
        let mut subscriber = bus.subscribe();
        for page in 2..=6 {
            bus.publish(page_changed("employees", page));
        }
        assert_eq!(pages(&mut subscriber), vec![5, 6]);
    }
}
