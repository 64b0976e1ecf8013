use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::models::{CountdownEvent, CourseEntry, WeatherSnapshot};

/// Read-only datasets served by the dispatcher. Built once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataStore {
    timetable: Vec<CourseEntry>,
    weather: WeatherSnapshot,
    countdown: CountdownEvent,
}

impl DataStore {
    pub fn new(timetable: Vec<CourseEntry>, weather: WeatherSnapshot, countdown: CountdownEvent) -> Self {
        Self {
            timetable,
            weather,
            countdown,
        }
    }

    /// Built-in demo dataset.
    pub fn sample() -> Self {
        let timetable = vec![
            CourseEntry::new("数学", "张老师", "08:00-09:30", "A101", false),
            CourseEntry::new("英语", "李老师", "10:00-11:30", "B202", true),
            CourseEntry::new("物理", "王老师", "14:00-15:30", "C303", false),
        ];

        let weather = WeatherSnapshot {
            city_name: "北京".to_string(),
            description: "晴".to_string(),
            temperature: "22℃".to_string(),
            temperature_range: "8℃~18℃".to_string(),
            aqilevel: 90,
            humidity: 65,
            wind: "东南风,2级".to_string(),
            pressure: 1016,
            sunrise: 80_760_000,
            sunset: 34_440_000,
            weather_type: 0,
            publish_time: "1508143200000".to_string(),
            locale: "zh_CN".to_string(),
        };

        let countdown = CountdownEvent {
            id: "1".to_string(),
            title: "Final Exam".to_string(),
            description: "Computer Science Final Examination".to_string(),
            target_date: Utc.with_ymd_and_hms(2024, 12, 15, 9, 0, 0).single().unwrap_or_default(),
            kind: "exam".to_string(),
            progress: 0.65,
            category: "Academic".to_string(),
        };

        Self::new(timetable, weather, countdown)
    }

    /// Loads `{"timetable": [...], "weather": {...}, "countdown": {...}}`.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read(path).map_err(|source| AppError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;
        let store: DataStore = serde_json::from_slice(&raw)?;
        info!(
            "Loaded dataset from {} ({} courses)",
            path.display(),
            store.timetable.len()
        );
        Ok(store)
    }

    pub fn timetable(&self) -> &[CourseEntry] {
        &self.timetable
    }

    /// First entry flagged current, in timetable order.
    pub fn current_course(&self) -> Option<&CourseEntry> {
        self.timetable.iter().find(|course| course.is_current)
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn countdown(&self) -> &CountdownEvent {
        &self.countdown
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::sample()
    }
}
