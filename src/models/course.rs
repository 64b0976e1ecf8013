use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    pub subject: String,
    pub teacher: String,
    /// Free-text interval such as `08:00-09:30`.
    pub time: String,
    pub classroom: String,
    pub is_current: bool,
}

impl CourseEntry {
    pub fn new(subject: &str, teacher: &str, time: &str, classroom: &str, is_current: bool) -> Self {
        Self {
            subject: subject.to_string(),
            teacher: teacher.to_string(),
            time: time.to_string(),
            classroom: classroom.to_string(),
            is_current,
        }
    }
}
