use std::collections::BTreeMap;

use chrono::Weekday;
use log::warn;
use serde::{Deserialize, Serialize};
use time::{weekday_name, ClockTime, ShiftTimeline};

use crate::base_types::{DepotId, ShiftId};
use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;

/// A weekday cell of the shift table. Tables mark active days with booleans, 0/1 or "x".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayMarker {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl DayMarker {
    pub fn is_set(&self) -> bool {
        match self {
            DayMarker::Flag(b) => *b,
            DayMarker::Number(n) => *n != 0.0,
            DayMarker::Text(s) => {
                let s = s.trim().to_lowercase();
                !matches!(s.as_str(), "" | "0" | "false" | "no" | "n")
            }
        }
    }
}

/// One row of the shift table, times still as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub shift_id: ShiftId,
    pub depot_id: DepotId,
    #[serde(default, deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub shift_start: Option<String>,
    #[serde(default, deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub shift_end: Option<String>,
    #[serde(default, deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub break1_start: Option<String>,
    #[serde(default, deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub break1_end: Option<String>,
    #[serde(default, deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub break2_start: Option<String>,
    #[serde(default, deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub break2_end: Option<String>,
    /// weekday column name (lower case) -> marker
    #[serde(default)]
    pub days: BTreeMap<String, DayMarker>,
}

impl ShiftRecord {
    pub fn has_weekday_column(&self, weekday: Weekday) -> bool {
        self.marker(weekday).is_some()
    }

    pub fn is_active_on(&self, weekday: Weekday) -> Result<bool, ConfigError> {
        match self.marker(weekday) {
            Some(marker) => Ok(marker.is_set()),
            None => Err(ConfigError::MissingWeekdayColumn {
                shift: self.shift_id.clone(),
                weekday: weekday_name(weekday).to_string(),
            }),
        }
    }

    fn marker(&self, weekday: Weekday) -> Option<&DayMarker> {
        let name = weekday_name(weekday);
        self.days
            .iter()
            .find(|(column, _)| column.trim().eq_ignore_ascii_case(name))
            .map(|(_, marker)| marker)
    }

    /// the shift on the timeline of the day it is declared for. Unparseable or missing shift times
    /// are read as 00:00 and counted; a break with a missing start or end is no break.
    pub fn timeline(&self, diagnostics: &mut Diagnostics) -> ShiftTimeline {
        // a missing shift boundary is unparseable, not "no shift"
        let start = self.parse_or_zero(
            self.shift_start.as_deref().unwrap_or_default(),
            "shift start",
            diagnostics,
        );
        let end = self.parse_or_zero(
            self.shift_end.as_deref().unwrap_or_default(),
            "shift end",
            diagnostics,
        );
        let mut breaks = Vec::new();
        for (break_start, break_end) in [
            (&self.break1_start, &self.break1_end),
            (&self.break2_start, &self.break2_end),
        ] {
            match (non_empty(break_start), non_empty(break_end)) {
                (Some(s), Some(e)) => breaks.push((
                    self.parse_or_zero(s, "break start", diagnostics),
                    self.parse_or_zero(e, "break end", diagnostics),
                )),
                (None, None) => {}
                _ => warn!(
                    "shift {}: break with only one boundary is ignored",
                    self.shift_id
                ),
            }
        }
        ShiftTimeline::normalize(start, end, breaks)
    }

    fn parse_or_zero(&self, raw: &str, field: &str, diagnostics: &mut Diagnostics) -> ClockTime {
        match ClockTime::parse(raw) {
            Ok(t) => t,
            Err(e) => {
                warn!(
                    "shift {}: cannot parse {} ({}), using 00:00",
                    self.shift_id, field, e
                );
                diagnostics.unparseable_times += 1;
                ClockTime::default()
            }
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
