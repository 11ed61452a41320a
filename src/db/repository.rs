//! Repository traits for abstracting storage operations.
//!
//! These traits define the only storage shapes the booking core issues,
//! allowing different backends to be swapped via dependency injection.
//! The core never reaches for a module-level singleton: services receive
//! a repository handle as a constructor parameter.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::models::{
    venues_overlap, Charge, Discount, Event, EventId, EventRef, EventStatus, FoodItem, Package,
    TimeSlot, Venue,
};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The write-time booking constraint rejected the operation: another
    /// non-terminal event already occupies an overlapping venue in the
    /// same date/slot. Carries the conflicting event so callers can
    /// surface it exactly like a check-time conflict.
    #[error("Booking conflict with event {}", conflicting.id)]
    Conflict { conflicting: EventRef },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}

/// Sort order for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSort {
    #[default]
    Ascending,
    Descending,
}

/// Declarative filter for event queries.
///
/// This is the only query shape the core issues; backends translate it
/// into whatever their storage engine needs.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Match a single status exactly.
    pub status: Option<EventStatus>,
    /// Restrict to non-terminal events (`booked` or `reserved`).
    pub non_terminal_only: bool,
    /// Match the exact calendar date.
    pub event_date: Option<NaiveDate>,
    /// Match the time slot.
    pub event_time: Option<TimeSlot>,
    /// Match events whose venue set contains this venue.
    pub venue: Option<Venue>,
    /// Match events whose venue set intersects this set.
    pub venues_any: Option<Vec<Venue>>,
    /// Match the client name exactly.
    pub client_name: Option<String>,
    /// Match events dated within this (year, month).
    pub month: Option<(i32, u32)>,
    /// Exclude one event id (used when rescheduling an existing event).
    pub exclude: Option<EventId>,
    /// Sort by event date. `None` leaves storage order.
    pub sort: Option<DateSort>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn non_terminal(mut self) -> Self {
        self.non_terminal_only = true;
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.event_date = Some(date);
        self
    }

    pub fn at_time(mut self, slot: TimeSlot) -> Self {
        self.event_time = Some(slot);
        self
    }

    pub fn at_venue(mut self, venue: Venue) -> Self {
        self.venue = Some(venue);
        self
    }

    pub fn any_of_venues(mut self, venues: Vec<Venue>) -> Self {
        self.venues_any = Some(venues);
        self
    }

    pub fn for_client(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn in_month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    pub fn excluding(mut self, id: EventId) -> Self {
        self.exclude = Some(id);
        self
    }

    pub fn sorted(mut self, sort: DateSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Predicate form of the filter, shared by in-memory backends.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }
        if self.non_terminal_only && event.status.is_terminal() {
            return false;
        }
        if let Some(date) = self.event_date {
            if event.event_date != date {
                return false;
            }
        }
        if let Some(slot) = self.event_time {
            if event.event_time != slot {
                return false;
            }
        }
        if let Some(venue) = self.venue {
            if !event.event_venues.contains(&venue) {
                return false;
            }
        }
        if let Some(ref venues) = self.venues_any {
            if !venues_overlap(venues, &event.event_venues) {
                return false;
            }
        }
        if let Some(ref name) = self.client_name {
            if &event.client_name != name {
                return false;
            }
        }
        if let Some((year, month)) = self.month {
            if event.event_date.year() != year || event.event_date.month() != month {
                return false;
            }
        }
        if let Some(exclude) = self.exclude {
            if event.id == exclude {
                return false;
            }
        }
        true
    }
}

/// Repository trait for event storage operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust and
/// allow sharing across request handlers.
///
/// # Constraint enforcement
/// `insert` and `update_fields` must re-validate the booking invariant
/// (no two non-terminal events may occupy intersecting venue sets in the
/// same date/slot) atomically with the write, returning
/// [`RepositoryError::Conflict`] on violation. The advisory availability
/// check is not atomic with the subsequent write, so this is the final
/// authority.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Check if the storage backend is reachable and healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Find all events matching the filter.
    async fn find(&self, filter: &EventFilter) -> RepositoryResult<Vec<Event>>;

    /// Find the first event matching the filter, if any.
    async fn find_one(&self, filter: &EventFilter) -> RepositoryResult<Option<Event>>;

    /// Load an event by id, failing with `NotFound` if absent.
    async fn get(&self, id: EventId) -> RepositoryResult<Event>;

    /// Persist a new event. The repository assigns the id; any id on the
    /// input is ignored. Fails with `Conflict` if the booking constraint
    /// is violated at write time.
    async fn insert(&self, event: Event) -> RepositoryResult<Event>;

    /// Update only the status (and cancel reason) of an existing event.
    async fn update_status(
        &self,
        id: EventId,
        status: EventStatus,
        cancel_reason: Option<String>,
    ) -> RepositoryResult<Event>;

    /// Persist the merged field set for an existing event, re-validating
    /// the booking constraint against all other non-terminal events.
    async fn update_fields(&self, id: EventId, event: Event) -> RepositoryResult<Event>;
}

/// Read-only catalog access.
///
/// Each getter returns a price/rate snapshot at call time; the core does
/// not cache or subscribe to catalog changes.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_package(&self, id: i64) -> RepositoryResult<Package>;
    async fn get_food_item(&self, id: i64) -> RepositoryResult<FoodItem>;
    async fn get_charge(&self, name: &str) -> RepositoryResult<Charge>;
    async fn get_discount(&self, name: &str) -> RepositoryResult<Discount>;

    async fn list_packages(&self) -> RepositoryResult<Vec<Package>>;
    async fn list_food_items(&self) -> RepositoryResult<Vec<FoodItem>>;
    async fn list_charges(&self) -> RepositoryResult<Vec<Charge>>;
    async fn list_discounts(&self) -> RepositoryResult<Vec<Discount>>;
}

/// Combined trait for backends that provide both event storage and
/// catalog access.
pub trait FullRepository: EventRepository + CatalogLookup {}

impl<T: EventRepository + CatalogLookup> FullRepository for T {}
