use serde::{Deserialize, Serialize};

/// Weather snapshot as the widget displays it. Values are already
/// locale-formatted; nothing here is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub description: String,
    pub temperature: String,
    pub temperature_range: String,
    pub aqilevel: u32,
    pub humidity: u32,
    pub wind: String,
    pub pressure: u32,
    pub sunrise: i64,
    pub sunset: i64,
    pub weather_type: i32,
    pub publish_time: String,
    pub locale: String,
}
