use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::models::{Envelope, Payload, RequestFrame, RequestKind, RequestParams};
use crate::store::DataStore;

/// Maps a request kind to its canned response. Pure: no I/O, no state
/// besides the read-only store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<DataStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn dispatch(&self, kind: &RequestKind, _params: Option<&RequestParams>) -> Envelope<'_> {
        let store = &*self.store;
        match kind {
            RequestKind::Timetable => Envelope::Success(Payload::Timetable(store.timetable())),
            RequestKind::CurrentCourse => Envelope::Success(Payload::CurrentCourse(store.current_course())),
            RequestKind::Weather => Envelope::Success(Payload::Weather(store.weather())),
            RequestKind::Countdown => Envelope::Success(Payload::Countdown(store.countdown())),
            RequestKind::Unknown(tag) => Envelope::failure(format!("Unknown request type: {}", tag)),
        }
    }

    /// Dispatches an already-parsed JSON value. Values that are not a
    /// request frame become a failure envelope.
    pub fn handle_value(&self, value: Value) -> Envelope<'_> {
        match serde_json::from_value::<RequestFrame>(value) {
            Ok(frame) => self.handle_frame(&frame),
            Err(e) => Envelope::failure(format!("Invalid request: {}", e)),
        }
    }

    /// Parses and dispatches a complete JSON message.
    pub fn handle_bytes(&self, bytes: &[u8]) -> Envelope<'_> {
        match serde_json::from_slice::<RequestFrame>(bytes) {
            Ok(frame) => self.handle_frame(&frame),
            Err(e) => Envelope::failure(format!("Invalid request: {}", e)),
        }
    }

    fn handle_frame(&self, frame: &RequestFrame) -> Envelope<'_> {
        let kind = frame.kind();
        debug!("Dispatching request: {}", kind);
        self.dispatch(&kind, frame.params.as_ref())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(DataStore::sample()))
    }
}
