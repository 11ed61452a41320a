//! Availability checking across date / time slot / venue set.
//!
//! The check is advisory: it answers against the repository at call
//! time, but no lock is held between the check and a subsequent write.
//! The repository enforces the same constraint again at write time, so
//! a race between two concurrent creations surfaces as the same
//! conflict shape, just later.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::db::{EventFilter, EventRepository, RepositoryResult};
use crate::models::{EventId, EventRef, TimeSlot, Venue};

/// A proposed (date, time slot, venue set) tuple to test for conflicts.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub venues: Vec<Venue>,
}

/// Answer to an availability query.
///
/// When `available` is false, `conflicting` names one existing booking
/// occupying the slot; multiple simultaneous conflicts are not
/// distinguished, only existence matters.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub available: bool,
    pub conflicting: Option<EventRef>,
}

impl Availability {
    fn free() -> Self {
        Self {
            available: true,
            conflicting: None,
        }
    }

    fn taken(conflicting: EventRef) -> Self {
        Self {
            available: false,
            conflicting: Some(conflicting),
        }
    }
}

/// Read-only conflict detector over the event repository.
#[derive(Clone)]
pub struct AvailabilityChecker {
    repo: Arc<dyn EventRepository>,
}

impl AvailabilityChecker {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// Can an event be (re)scheduled into this slot?
    ///
    /// Only non-terminal events (`booked`, `reserved`) participate;
    /// cancelled and finished events never block a slot. Pass
    /// `exclude` when rescheduling so an event does not conflict with
    /// itself.
    pub async fn check(
        &self,
        query: &AvailabilityQuery,
        exclude: Option<EventId>,
    ) -> RepositoryResult<Availability> {
        if query.venues.is_empty() {
            return Ok(Availability::free());
        }

        let mut filter = EventFilter::new()
            .non_terminal()
            .on_date(query.date)
            .at_time(query.time)
            .any_of_venues(query.venues.clone());
        if let Some(id) = exclude {
            filter = filter.excluding(id);
        }

        match self.repo.find_one(&filter).await? {
            Some(event) => Ok(Availability::taken(event.to_ref())),
            None => Ok(Availability::free()),
        }
    }
}
