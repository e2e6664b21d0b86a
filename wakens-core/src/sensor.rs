use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Airborne pollutant levels reported by a room's sensor pack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQuality {
    pub pm25: f64,
    pub pm10: f64,
    pub sox: f64,
    pub nox: f64,
    pub voc: f64,
    pub co: f64,
    pub co2: f64,
    pub aqi: f64,
}

/// Tap/filtered water measurements. Not every room carries these probes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterQuality {
    pub tds: f64,
    pub turbidity: f64,
    pub ph: f64,
    pub dissolved_oxygen: f64,
}

/// One timestamped environmental sample for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReading {
    pub room_id: String,
    pub timestamp: DateTime<Utc>,
    pub air_quality: AirQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_quality: Option<WaterQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

/// Sensor reachability derived from reading recency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SensorHealth {
    Online,
    Warning,
    Offline,
}

impl std::fmt::Display for SensorHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorHealth::Online => write!(f, "online"),
            SensorHealth::Warning => write!(f, "warning"),
            SensorHealth::Offline => write!(f, "offline"),
        }
    }
}

/// Derived status of a room's sensor. Never stored, always recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorStatus {
    pub status: SensorHealth,
    pub last_update: Option<DateTime<Utc>>,
    pub minutes_ago: i64,
}

impl SensorStatus {
    /// Derive status from the latest reading's age. Total for any input:
    /// < 5 minutes → online, < 15 minutes → warning, else offline. An absent
    /// reading is offline with minutes_ago = 0.
    pub fn derive(latest: Option<&EnvironmentalReading>, now: DateTime<Utc>) -> Self {
        let reading = match latest {
            Some(r) => r,
            None => {
                return Self {
                    status: SensorHealth::Offline,
                    last_update: None,
                    minutes_ago: 0,
                }
            }
        };

        let minutes = (now - reading.timestamp).num_seconds() as f64 / 60.0;

        let status = if minutes < 5.0 {
            SensorHealth::Online
        } else if minutes < 15.0 {
            SensorHealth::Warning
        } else {
            SensorHealth::Offline
        };

        Self {
            status,
            last_update: Some(reading.timestamp),
            minutes_ago: minutes.round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reading_aged(now: DateTime<Utc>, age: Duration) -> EnvironmentalReading {
        EnvironmentalReading {
            room_id: "r1".to_string(),
            timestamp: now - age,
            air_quality: AirQuality {
                pm25: 8.0,
                pm10: 14.0,
                sox: 2.0,
                nox: 6.0,
                voc: 40.0,
                co: 0.4,
                co2: 520.0,
                aqi: 91.0,
            },
            water_quality: None,
            temperature: Some(24.5),
            humidity: Some(55.0),
        }
    }

    #[test]
    fn absent_reading_is_offline() {
        let status = SensorStatus::derive(None, Utc::now());
        assert_eq!(status.status, SensorHealth::Offline);
        assert_eq!(status.last_update, None);
        assert_eq!(status.minutes_ago, 0);
    }

    #[test]
    fn fresh_reading_is_online() {
        let now = Utc::now();
        let reading = reading_aged(now, Duration::seconds(4 * 60 + 59));
        let status = SensorStatus::derive(Some(&reading), now);
        assert_eq!(status.status, SensorHealth::Online);
        assert_eq!(status.last_update, Some(reading.timestamp));
    }

    #[test]
    fn five_minutes_exactly_is_warning() {
        let now = Utc::now();
        let reading = reading_aged(now, Duration::minutes(5));
        let status = SensorStatus::derive(Some(&reading), now);
        assert_eq!(status.status, SensorHealth::Warning);
        assert_eq!(status.minutes_ago, 5);
    }

    #[test]
    fn stale_reading_is_offline() {
        let now = Utc::now();
        let reading = reading_aged(now, Duration::minutes(20));
        let status = SensorStatus::derive(Some(&reading), now);
        assert_eq!(status.status, SensorHealth::Offline);
        assert_eq!(status.minutes_ago, 20);
    }

    #[test]
    fn reading_roundtrips_camel_case() {
        let now = Utc::now();
        let reading = reading_aged(now, Duration::minutes(1));
        let json = serde_json::to_value(&reading).unwrap();
        assert!(json.get("roomId").is_some());
        assert!(json.get("airQuality").is_some());
        // Optional blocks are omitted entirely when absent
        assert!(json.get("waterQuality").is_none());
    }
}
