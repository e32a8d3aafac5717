use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub distance_km: f64,
    /// Travel time in traffic, whole minutes.
    pub duration_minutes: u32,
    pub traffic_factor: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    pub fn from_factor(traffic_factor: f64) -> Self {
        if traffic_factor >= 1.4 {
            Self::High
        } else if traffic_factor >= 1.1 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl RouteMetrics {
    pub fn traffic_level(&self) -> TrafficLevel {
        TrafficLevel::from_factor(self.traffic_factor)
    }
}
