use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "iso_millis")]
    pub target_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    /// Nominally in `[0, 1]`, not validated.
    pub progress: f64,
    pub category: String,
}

/// `2024-12-15T09:00:00.000Z`
mod iso_millis {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_target_date_uses_millisecond_utc_format() {
        let event = CountdownEvent {
            id: "1".to_string(),
            title: "Final Exam".to_string(),
            description: "Computer Science Final Examination".to_string(),
            target_date: Utc.with_ymd_and_hms(2024, 12, 15, 9, 0, 0).unwrap(),
            kind: "exam".to_string(),
            progress: 0.65,
            category: "Academic".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["targetDate"], "2024-12-15T09:00:00.000Z");
        assert_eq!(json["type"], "exam");

        let back: CountdownEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_target_date_accepts_offsets() {
        let json = serde_json::json!({
            "id": "2",
            "title": "t",
            "description": "d",
            "targetDate": "2024-12-15T17:00:00+08:00",
            "type": "exam",
            "progress": 0.1,
            "category": "c"
        });
        let event: CountdownEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.target_date, Utc.with_ymd_and_hms(2024, 12, 15, 9, 0, 0).unwrap());
    }
}
