use async_trait::async_trait;
use redis::AsyncCommands;
use std::collections::HashMap;
use tracing::warn;

use wakens_core::repository::SensorReadingRepository;
use wakens_core::sensor::EnvironmentalReading;

/// Redis-backed sensor store. One hash per room under `sensors:{room_id}`:
/// a field per RFC 3339 timestamp holding the JSON reading, plus a `latest`
/// field the writer overwrites on every write.
#[derive(Clone)]
pub struct RedisSensorRepository {
    client: redis::Client,
}

const LATEST_FIELD: &str = "latest";

fn room_key(room_id: &str) -> String {
    format!("sensors:{}", room_id)
}

impl RedisSensorRepository {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SensorReadingRepository for RedisSensorRepository {
    async fn write_reading(
        &self,
        reading: &EnvironmentalReading,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = room_key(&reading.room_id);
        let payload = serde_json::to_string(reading)?;

        conn.hset::<_, _, _, ()>(&key, reading.timestamp.to_rfc3339(), &payload)
            .await?;
        // Unconditional overwrite: callers write in timestamp order
        conn.hset::<_, _, _, ()>(&key, LATEST_FIELD, &payload).await?;
        Ok(())
    }

    async fn get_latest(
        &self,
        room_id: &str,
    ) -> Result<Option<EnvironmentalReading>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.hget(room_key(room_id), LATEST_FIELD).await?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn get_recent(
        &self,
        room_id: &str,
        limit: usize,
    ) -> Result<Vec<EnvironmentalReading>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let entries: HashMap<String, String> = conn.hgetall(room_key(room_id)).await?;

        let mut readings: Vec<EnvironmentalReading> = entries
            .into_iter()
            .filter(|(field, _)| field != LATEST_FIELD)
            .filter_map(|(field, json)| match serde_json::from_str(&json) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    warn!("Skipping unparseable reading {} for {}: {}", field, room_id, e);
                    None
                }
            })
            .collect();

        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        readings.truncate(limit);
        Ok(readings)
    }

    async fn list_rooms_with_data(
        &self,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let keys: Vec<String> = conn.keys("sensors:*").await?;

        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix("sensors:").map(|s| s.to_string()))
            .collect())
    }
}
