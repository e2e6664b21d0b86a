use serde::{Deserialize, Serialize};
use wakens_core::sensor::{AirQuality, WaterQuality};

/// Static environmental snapshot for a room. This is the fallback surface:
/// when no live reading exists (or the store is unreachable), consumers
/// render these numbers instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetric {
    pub room_id: String,
    pub eco_score: i64,
    pub noise: i64,
    pub air_quality: AirQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_quality: Option<WaterQuality>,
    pub temperature: f64,
    pub humidity: f64,
}

fn metric(room_id: &str, eco_score: i64, noise: i64, aqi: f64, co2: f64, temperature: f64, humidity: f64) -> RoomMetric {
    RoomMetric {
        room_id: room_id.to_string(),
        eco_score,
        noise,
        air_quality: AirQuality {
            pm25: 9.0,
            pm10: 16.0,
            sox: 3.0,
            nox: 7.0,
            voc: 45.0,
            co: 0.5,
            co2,
            aqi,
        },
        water_quality: Some(WaterQuality {
            tds: 140.0,
            turbidity: 0.4,
            ph: 7.2,
            dissolved_oxygen: 7.8,
        }),
        temperature,
        humidity,
    }
}

pub fn metrics() -> Vec<RoomMetric> {
    vec![
        metric("r1", 92, 32, 91.0, 520.0, 24.5, 55.0),
        metric("r2", 89, 35, 88.0, 540.0, 25.1, 58.0),
        metric("r3", 90, 30, 89.0, 510.0, 24.2, 54.0),
        metric("r4", 87, 36, 86.0, 560.0, 25.4, 59.0),
        metric("r5", 78, 41, 80.0, 610.0, 26.0, 61.0),
        metric("r6", 90, 28, 85.0, 500.0, 23.6, 52.0),
    ]
}

pub fn find_metric(room_id: &str) -> Option<RoomMetric> {
    metrics().into_iter().find(|m| m.room_id == room_id)
}
