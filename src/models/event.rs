//! The event entity and its input shapes.
//!
//! An event is never physically deleted: cancellation is a status, not a
//! removal, and the stored `total_prices` breakdown is a snapshot taken
//! when the event is created or re-priced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::venue::{TimeSlot, Venue};

/// Opaque event identifier, assigned by the repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EventId(pub i64);

impl EventId {
    pub fn new(id: i64) -> Self {
        EventId(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an event.
///
/// `Finished` and `Cancelled` are terminal: no further transitions are
/// permitted, and terminal events never participate in conflict checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Tentative pencil booking.
    Booked,
    /// Confirmed reservation.
    Reserved,
    Finished,
    Cancelled,
}

impl EventStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Finished | EventStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Booked => "booked",
            EventStatus::Reserved => "reserved",
            EventStatus::Finished => "finished",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package snapshot stored on the event at pricing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSnapshot {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// An additional food line: catalog reference plus the priced snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuLine {
    pub food_item: i64,
    pub food_name: String,
    pub food_quantity: u32,
    /// Unit price at booking time times quantity.
    pub food_cost: f64,
}

/// An extra charge line with the unit price captured at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub charge_name: String,
    pub charge_quantity: u32,
    pub charge_price: f64,
}

/// A discount line with the amount already computed against the gross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub discount_name: String,
    pub discount_price: f64,
}

/// Itemized price breakdown, computed once and stored with the event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalPrices {
    pub packages: f64,
    pub food: f64,
    pub charges: f64,
    pub discounts: f64,
    pub all: f64,
}

/// The central booking entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub status: EventStatus,

    pub client_name: String,
    pub client_mobile_number: String,
    /// Representative employee, denormalized at creation time.
    pub rep_name: String,
    pub rep_mobile_number: String,

    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: TimeSlot,
    pub num_of_pax: u32,
    /// Non-empty set of venues the event occupies simultaneously.
    pub event_venues: Vec<Venue>,

    pub package: PackageSnapshot,
    pub menu_additional: Vec<MenuLine>,
    pub transaction_charges: Vec<ChargeLine>,
    pub transaction_discounts: Vec<DiscountLine>,
    pub total_prices: TotalPrices,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl Event {
    /// Lightweight reference used in conflict reports.
    pub fn to_ref(&self) -> EventRef {
        EventRef {
            id: self.id,
            client_name: self.client_name.clone(),
            event_date: self.event_date,
            event_time: self.event_time,
            event_venues: self.event_venues.clone(),
        }
    }
}

/// Reference to an existing event, carried by availability answers and
/// conflict errors so callers can present an actionable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    pub id: EventId,
    pub client_name: String,
    pub event_date: NaiveDate,
    pub event_time: TimeSlot,
    pub event_venues: Vec<Venue>,
}

/// A food selection in a creation/update request: catalog id + quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSelection {
    pub food_item: i64,
    pub quantity: u32,
}

/// A charge selection in a creation/update request: catalog name + quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeSelection {
    pub name: String,
    pub quantity: u32,
}

/// Input for event creation. Pricing-relevant selections reference the
/// catalog; snapshots are resolved and priced by the lifecycle service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub client_name: String,
    pub client_mobile_number: String,
    pub rep_name: String,
    pub rep_mobile_number: String,

    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: TimeSlot,
    pub num_of_pax: u32,
    pub event_venues: Vec<Venue>,

    pub package: i64,
    #[serde(default)]
    pub menu_additional: Vec<MenuSelection>,
    #[serde(default)]
    pub charges: Vec<ChargeSelection>,
    /// Discount names, resolved to rates against the catalog.
    #[serde(default)]
    pub discounts: Vec<String>,
}

/// Partial update for a non-terminal event. `None` fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    pub client_name: Option<String>,
    pub client_mobile_number: Option<String>,
    pub rep_name: Option<String>,
    pub rep_mobile_number: Option<String>,

    pub event_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<TimeSlot>,
    pub num_of_pax: Option<u32>,
    pub event_venues: Option<Vec<Venue>>,

    pub package: Option<i64>,
    pub menu_additional: Option<Vec<MenuSelection>>,
    pub charges: Option<Vec<ChargeSelection>>,
    pub discounts: Option<Vec<String>>,
}

impl EventPatch {
    /// Does this patch touch any scheduling field (date / time / venues)?
    pub fn touches_scheduling(&self) -> bool {
        self.event_date.is_some() || self.event_time.is_some() || self.event_venues.is_some()
    }

    /// Does this patch touch any pricing-relevant selection?
    pub fn touches_pricing(&self) -> bool {
        self.package.is_some()
            || self.menu_additional.is_some()
            || self.charges.is_some()
            || self.discounts.is_some()
    }

    /// Names of the fields present in the patch, for audit descriptions.
    pub fn modified_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.client_name.is_some() {
            fields.push("client_name");
        }
        if self.client_mobile_number.is_some() {
            fields.push("client_mobile_number");
        }
        if self.rep_name.is_some() {
            fields.push("rep_name");
        }
        if self.rep_mobile_number.is_some() {
            fields.push("rep_mobile_number");
        }
        if self.event_type.is_some() {
            fields.push("event_type");
        }
        if self.event_date.is_some() {
            fields.push("event_date");
        }
        if self.event_time.is_some() {
            fields.push("event_time");
        }
        if self.num_of_pax.is_some() {
            fields.push("num_of_pax");
        }
        if self.event_venues.is_some() {
            fields.push("event_venues");
        }
        if self.package.is_some() {
            fields.push("package");
        }
        if self.menu_additional.is_some() {
            fields.push("menu_additional");
        }
        if self.charges.is_some() {
            fields.push("charges");
        }
        if self.discounts.is_some() {
            fields.push("discounts");
        }
        fields
    }
}
