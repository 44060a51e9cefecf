//! Event bus: fans one event out to several listeners.
//!
//! ```text
//! RunDebateUseCase.execute_with_listener(input, &bus)
//!                                         |
//!          +------------------------------+------------------------------+
//!          |                              |                              |
//!   ConsoleListener             JsonlTranscriptWriter             ResultCollector
//! ```

use super::event_listener::{DebateListener, ListenerError};
use debate_domain::DebateEvent;

/// A listener that delegates to multiple inner listeners in registration
/// order.
///
/// Uses borrowed references with a lifetime parameter so both owned and
/// borrowed listeners can be composed without wrapper types.
#[derive(Default)]
pub struct EventBus<'a> {
    listeners: Vec<&'a dyn DebateListener>,
}

impl<'a> EventBus<'a> {
    pub fn new(listeners: Vec<&'a dyn DebateListener>) -> Self {
        Self { listeners }
    }

    pub fn register(&mut self, listener: &'a dyn DebateListener) {
        self.listeners.push(listener);
    }

    pub fn with(mut self, listener: &'a dyn DebateListener) -> Self {
        self.register(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl DebateListener for EventBus<'_> {
    /// Stops at the first failing listener; later listeners do not see the event.
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
        for listener in &self.listeners {
            listener.on_event(event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{EventMetadata, EventType};
    use std::sync::Mutex;

    struct Recording {
        tag: &'static str,
        log: &'static Mutex<Vec<String>>,
    }

    impl DebateListener for Recording {
        fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.tag, event.event_type()));
            Ok(())
        }
    }

    struct Failing;

    impl DebateListener for Failing {
        fn on_event(&self, _event: &DebateEvent) -> Result<(), ListenerError> {
            Err(ListenerError::Other("disk full".to_string()))
        }
    }

    fn turn() -> DebateEvent {
        DebateEvent::new(EventMetadata::Turn, "Ada", "hello", "red")
    }

    #[test]
    fn test_delivers_in_registration_order() {
        static LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let first = Recording { tag: "a", log: &LOG };
        let second = Recording { tag: "b", log: &LOG };
        let bus = EventBus::new(vec![&first]).with(&second);

        bus.on_event(&turn()).unwrap();
        assert_eq!(*LOG.lock().unwrap(), vec!["a:TURN", "b:TURN"]);
        assert_eq!(turn().event_type(), EventType::Turn);
    }

    #[test]
    fn test_error_stops_delivery() {
        static LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let after = Recording { tag: "after", log: &LOG };
        let failing = Failing;
        let bus = EventBus::new(vec![&failing, &after]);

        assert!(bus.on_event(&turn()).is_err());
        assert!(LOG.lock().unwrap().is_empty());
    }
}
