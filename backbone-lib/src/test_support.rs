//! In-memory stand-ins for the connection and the front end.

use crate::traits::{Frontend, SocketConnection, SocketEvent};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct WireState {
    incoming: VecDeque<SocketEvent>,
    sent: Vec<String>,
}

/// The test side of a [`MockConnection`]: scripts incoming events and inspects sent frames.
#[derive(Clone, Default)]
pub struct MockWire(Rc<RefCell<WireState>>);

impl MockWire {
    pub fn push(&self, event: SocketEvent) {
        self.0.borrow_mut().incoming.push_back(event);
    }

    pub fn push_text(&self, text: &str) {
        self.push(SocketEvent::Text(text.to_string()));
    }

    pub fn sent(&self) -> Vec<String> {
        self.0.borrow().sent.clone()
    }

    pub fn sent_json(&self) -> Vec<Value> {
        self.sent()
            .iter()
            .map(|frame| serde_json::from_str(frame).unwrap())
            .collect()
    }
}

/// A connection that records what gets sent and replays what the test pushed.
pub struct MockConnection {
    wire: MockWire,
}

impl MockConnection {
    pub fn new() -> (Self, MockWire) {
        let wire = MockWire::default();
        (Self { wire: wire.clone() }, wire)
    }
}

impl SocketConnection for MockConnection {
    fn send_text(&mut self, text: String) {
        self.wire.0.borrow_mut().sent.push(text);
    }

    fn poll_event(&mut self) -> Option<SocketEvent> {
        self.wire.0.borrow_mut().incoming.pop_front()
    }
}

/// Remembers every alert and navigation.
#[derive(Default, Debug)]
pub struct RecordingFrontend {
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
}

impl Frontend for RecordingFrontend {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, location: &str) {
        self.navigations.push(location.to_string());
    }
}
