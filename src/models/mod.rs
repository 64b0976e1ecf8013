pub mod countdown;
pub mod course;
pub mod envelope;
pub mod request;
pub mod weather;

pub use countdown::CountdownEvent;
pub use course::CourseEntry;
pub use envelope::{Envelope, Payload};
pub use request::{RequestFrame, RequestKind, RequestParams};
pub use weather::WeatherSnapshot;
