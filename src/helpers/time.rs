use chrono::{DateTime, Utc};
use tokio::time::Instant;

pub fn unix_seconds(at: DateTime<Utc>) -> i64 {
    at.timestamp()
}

pub fn get_instant() -> Instant {
    Instant::now()
}
