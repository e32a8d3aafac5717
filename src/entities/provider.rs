use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::VehicleClass;
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    XanhSm,
    Be,
    Grab,
}

/// Immutable fare parameters for one provider and vehicle class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
    pub surge_threshold: f64,
    pub surge_multiplier: f64,
}

impl Provider {
    /// Roster in the order quotes are produced before ranking.
    pub const ALL: [Provider; 3] = [Provider::XanhSm, Provider::Be, Provider::Grab];

    pub fn name(&self) -> &'static str {
        match self {
            Self::XanhSm => "xanh_sm",
            Self::Be => "be",
            Self::Grab => "grab",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::XanhSm => "Xanh SM",
            Self::Be => "Be",
            Self::Grab => "Grab",
        }
    }

    /// Opened when the native app does not intercept the booking link.
    pub fn web_url(&self) -> &'static str {
        match self {
            Self::XanhSm => "https://www.xanhsm.com/",
            Self::Be => "https://be.com.vn/",
            Self::Grab => "https://www.grab.com/vn/transport/",
        }
    }

    /// Pickup ETA adjustment relative to the per-request base ETA.
    pub fn eta_offset(&self) -> i64 {
        match self {
            Self::XanhSm => 1,
            Self::Be => 0,
            Self::Grab => -1,
        }
    }

    pub fn pricing(&self, vehicle_class: VehicleClass) -> PricingModel {
        let (base_fare, per_km_rate, per_minute_rate) = match (self, vehicle_class) {
            (Self::XanhSm, VehicleClass::Bike) => (12_000.0, 4_000.0, 0.0),
            (Self::XanhSm, VehicleClass::Car) => (28_000.0, 11_000.0, 0.0),
            (Self::Be, VehicleClass::Bike) => (11_000.0, 3_800.0, 250.0),
            (Self::Be, VehicleClass::Car) => (26_000.0, 10_500.0, 450.0),
            (Self::Grab, VehicleClass::Bike) => (12_500.0, 4_200.0, 300.0),
            (Self::Grab, VehicleClass::Car) => (29_000.0, 11_500.0, 500.0),
        };

        let (surge_threshold, surge_multiplier) = match self {
            Self::XanhSm => (1.5, 1.1),
            Self::Be => (1.3, 1.15),
            Self::Grab => (1.2, 1.3),
        };

        PricingModel {
            base_fare,
            per_km_rate,
            per_minute_rate,
            surge_threshold,
            surge_multiplier,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = Error;

    /// Accepts the wire name or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Provider::ALL
            .into_iter()
            .find(|provider| {
                needle.eq_ignore_ascii_case(provider.name())
                    || needle.eq_ignore_ascii_case(provider.display_name())
            })
            .ok_or_else(invalid_input_error)
    }
}
