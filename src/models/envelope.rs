use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{CountdownEvent, CourseEntry, WeatherSnapshot};

/// Success payloads, borrowed from the data store.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    Timetable(&'a [CourseEntry]),
    CurrentCourse(Option<&'a CourseEntry>),
    Weather(&'a WeatherSnapshot),
    Countdown(&'a CountdownEvent),
}

impl Serialize for Payload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Timetable(entries) => entries.serialize(serializer),
            Payload::CurrentCourse(entry) => entry.serialize(serializer),
            Payload::Weather(weather) => weather.serialize(serializer),
            Payload::Countdown(countdown) => countdown.serialize(serializer),
        }
    }
}

/// Response wrapper shared by every transport.
///
/// Serialises as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<'a> {
    Success(Payload<'a>),
    Failure(String),
}

impl<'a> Envelope<'a> {
    pub fn failure(error: impl Into<String>) -> Self {
        Envelope::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// JSON text followed by a single `\n`, as written on the pipe.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

impl Serialize for Envelope<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Envelope::Success(payload) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", payload)?;
            }
            Envelope::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
