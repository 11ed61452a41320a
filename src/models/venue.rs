//! Closed enumerations for venues and time slots.
//!
//! The deployment rents out a fixed set of venues in two daily slots.
//! Both enumerations are validated once at the boundary (parsing), so
//! internal logic never deals with malformed labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a venue or time-slot label is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} label: '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

/// A rentable venue. An event may occupy several venues at once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Venue {
    Garden,
    Sunroom,
    Terrace,
}

impl Venue {
    /// All venues the deployment rents out, in display order.
    pub const ALL: [Venue; 3] = [Venue::Garden, Venue::Sunroom, Venue::Terrace];

    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Garden => "Garden",
            Venue::Sunroom => "Sunroom",
            Venue::Terrace => "Terrace",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Venue {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Garden" => Ok(Venue::Garden),
            "Sunroom" => Ok(Venue::Sunroom),
            "Terrace" => Ok(Venue::Terrace),
            other => Err(ParseLabelError {
                kind: "venue",
                value: other.to_string(),
            }),
        }
    }
}

/// A bookable time slot within a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TimeSlot {
    Afternoon,
    Evening,
}

impl TimeSlot {
    /// All slots a venue can be booked for on a given date.
    pub const ALL: [TimeSlot; 2] = [TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Afternoon" => Ok(TimeSlot::Afternoon),
            "Evening" => Ok(TimeSlot::Evening),
            other => Err(ParseLabelError {
                kind: "time slot",
                value: other.to_string(),
            }),
        }
    }
}

/// Two venue sets conflict iff they share at least one venue.
pub fn venues_overlap(a: &[Venue], b: &[Venue]) -> bool {
    a.iter().any(|v| b.contains(v))
}
