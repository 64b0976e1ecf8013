use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Reserved for per-kind filtering; no kind reads it yet.
pub type RequestParams = Map<String, Value>;

/// The closed set of request kinds, plus whatever else a client sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Timetable,
    CurrentCourse,
    Weather,
    Countdown,
    Unknown(String),
}

impl RequestKind {
    pub fn as_str(&self) -> &str {
        match self {
            RequestKind::Timetable => "timetable",
            RequestKind::CurrentCourse => "current-course",
            RequestKind::Weather => "weather",
            RequestKind::Countdown => "countdown",
            RequestKind::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for RequestKind {
    fn from(tag: &str) -> Self {
        match tag {
            "timetable" => RequestKind::Timetable,
            "current-course" => RequestKind::CurrentCourse,
            "weather" => RequestKind::Weather,
            "countdown" => RequestKind::Countdown,
            other => RequestKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shape of a request on the pipe and WebSocket transports:
/// `{"type": "...", "params": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Option<RequestParams>,
}

impl RequestFrame {
    pub fn kind(&self) -> RequestKind {
        RequestKind::from(self.kind.as_str())
    }
}
