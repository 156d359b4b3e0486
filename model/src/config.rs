use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use time::{parse_weekday, Time};

use crate::base_types::{DepotId, PassengerCount};
use crate::error::ConfigError;
use crate::regimes::{CoveragePolicy, FleetScope, OperatingRegime};
use crate::shifts::ShiftRecord;

/// Plain key/value settings of one run. Threaded explicitly through the construction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub average_speed_kmh: f64,
    pub earth_radius_km: f64,
    /// start of the generic availability window, in minutes relative to midnight
    pub pre_midnight_buffer: Time,
    pub weekdays: Vec<String>,
    pub exclude_fulfilled_demand: bool,
    pub fulfilled_statuses: Vec<String>,
    pub solver_time_limit_seconds: u64,
    /// shift/vehicle pool of the capacity regime
    pub capacity_scope: FleetScope,
    /// capacity of unconstrained buses, defaults to the number of trips
    pub unconstrained_capacity: Option<PassengerCount>,
    /// capacity used when a depot has no vehicles
    pub fallback_capacity: Option<PassengerCount>,
    pub sweep: ConfigSweep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSweep {
    /// empty means all depots
    pub depots: Vec<DepotId>,
    pub dates: Vec<NaiveDate>,
    pub regimes: Vec<OperatingRegime>,
    pub policies: Vec<CoveragePolicy>,
    pub service_levels: Vec<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            average_speed_kmh: 30.0,
            earth_radius_km: 6371.0,
            pre_midnight_buffer: Time::from_minutes(-120),
            weekdays: [
                "monday",
                "tuesday",
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            exclude_fulfilled_demand: false,
            fulfilled_statuses: vec![String::from("fulfilled")],
            solver_time_limit_seconds: 600,
            capacity_scope: FleetScope::Fleet,
            unconstrained_capacity: None,
            fallback_capacity: None,
            sweep: ConfigSweep::default(),
        }
    }
}

impl Default for ConfigSweep {
    fn default() -> Self {
        ConfigSweep {
            depots: Vec::new(),
            dates: Vec::new(),
            regimes: OperatingRegime::ALL.to_vec(),
            policies: CoveragePolicy::ALL.to_vec(),
            service_levels: vec![1.0],
        }
    }
}

// static functions
impl Config {
    /// reads a toml, json or yaml file (format by extension). Missing keys keep their default.
    pub fn from_file(path: &str) -> Result<Config, ConfigError> {
        let config = ::config::Config::builder()
            .add_source(::config::File::with_name(path))
            .build()?
            .try_deserialize::<Config>()?;
        config.validate()?;
        Ok(config)
    }
}

// methods
impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.average_speed_kmh.is_nan() || self.average_speed_kmh <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.average_speed_kmh));
        }
        if self.earth_radius_km.is_nan() || self.earth_radius_km <= 0.0 {
            return Err(ConfigError::NonPositiveEarthRadius(self.earth_radius_km));
        }
        self.target_weekdays()?;
        Ok(())
    }

    /// every configured weekday must be a column of every shift record.
    pub fn validate_against_shifts(&self, shifts: &[ShiftRecord]) -> Result<(), ConfigError> {
        for weekday in self.target_weekdays()? {
            for shift in shifts {
                shift.is_active_on(weekday)?;
            }
        }
        Ok(())
    }

    pub fn target_weekdays(&self) -> Result<Vec<Weekday>, ConfigError> {
        self.weekdays
            .iter()
            .map(|w| parse_weekday(w).map_err(ConfigError::from))
            .collect()
    }

    pub fn plans_weekday(&self, weekday: Weekday) -> bool {
        self.weekdays
            .iter()
            .any(|w| parse_weekday(w).map_or(false, |p| p == weekday))
    }

    pub fn buffer(&self) -> Time {
        self.pre_midnight_buffer
    }

    pub fn solver_time_limit(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.solver_time_limit_seconds)
    }

    pub fn minutes_for_km(&self, km: f64) -> f64 {
        km / self.average_speed_kmh * 60.0
    }

    pub fn is_fulfilled_status(&self, status: &str) -> bool {
        let status = status.trim();
        self.fulfilled_statuses
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(status))
    }
}
