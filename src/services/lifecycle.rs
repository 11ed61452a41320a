//! Event lifecycle: creation, status transitions, and field updates.
//!
//! States are `booked`, `reserved`, `finished`, `cancelled`; the last
//! two are terminal. Creation and rescheduling re-validate availability;
//! finishing and cancelling do not. Pricing is computed once per
//! creation or pricing-relevant update and stored on the event, so
//! receipts stay stable when catalog prices later change.

use log::warn;
use std::sync::Arc;

use crate::db::{CatalogLookup, EventRepository, RepositoryError};
use crate::models::{
    ChargeLine, ChargeSelection, DiscountLine, Event, EventId, EventPatch, EventRef, EventStatus,
    MenuLine, MenuSelection, NewEvent, PackageSnapshot, TotalPrices,
};
use crate::services::availability::{AvailabilityChecker, AvailabilityQuery};
use crate::services::audit::AuditSink;
use crate::services::pricing::{self, PricingError};

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Error type for lifecycle operations. Every rejected operation names
/// the precondition that failed.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Event {0} not found")]
    NotFound(EventId),

    #[error("Unknown catalog reference: {0}")]
    UnknownCatalogItem(String),

    #[error("Event {id} is {status} and cannot be modified")]
    TerminalState { id: EventId, status: EventStatus },

    #[error("Requested slot is unavailable: conflicts with event {}", conflicting.id)]
    AvailabilityConflict { conflicting: EventRef },

    #[error("Initial status must be 'booked' or 'reserved' (got '{0}')")]
    InvalidInitialStatus(EventStatus),

    #[error("Cannot transition event {id} from '{from}' to '{to}'")]
    InvalidTransition {
        id: EventId,
        from: EventStatus,
        to: EventStatus,
    },

    #[error("Cancellation requires a non-empty reason")]
    MissingCancelReason,

    #[error("An event must occupy at least one venue")]
    EmptyVenues,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Storage failure: {0}")]
    Storage(RepositoryError),
}

/// Map a repository error from a write path. A write-time constraint
/// violation is surfaced exactly like a check-time conflict: callers
/// cannot distinguish "caught early" from "caught late".
fn storage_error(err: RepositoryError) -> LifecycleError {
    match err {
        RepositoryError::Conflict { conflicting } => {
            LifecycleError::AvailabilityConflict { conflicting }
        }
        other => LifecycleError::Storage(other),
    }
}

/// Map a catalog lookup error: a missing entry means the caller sent a
/// stale or bogus reference, not that storage is broken.
fn catalog_error(err: RepositoryError) -> LifecycleError {
    match err {
        RepositoryError::NotFound(what) => LifecycleError::UnknownCatalogItem(what),
        other => LifecycleError::Storage(other),
    }
}

/// Resolved and priced selections, ready to copy onto an event.
struct PricedEvent {
    package: PackageSnapshot,
    menu_additional: Vec<MenuLine>,
    transaction_charges: Vec<ChargeLine>,
    transaction_discounts: Vec<DiscountLine>,
    total_prices: TotalPrices,
}

/// Owns the booking state machine.
///
/// Dependencies are injected at construction; the lifecycle never
/// reaches for a global repository.
pub struct EventLifecycle {
    repo: Arc<dyn EventRepository>,
    catalog: Arc<dyn CatalogLookup>,
    availability: AvailabilityChecker,
    audit: Arc<dyn AuditSink>,
}

impl EventLifecycle {
    pub fn new(
        repo: Arc<dyn EventRepository>,
        catalog: Arc<dyn CatalogLookup>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let availability = AvailabilityChecker::new(Arc::clone(&repo));
        Self {
            repo,
            catalog,
            availability,
            audit,
        }
    }

    /// The checker this lifecycle validates slots with, for callers that
    /// want to pre-check availability without creating anything.
    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    /// Create an event in `booked` or `reserved` status.
    ///
    /// Validates the initial status, checks availability, prices the
    /// selections against the catalog, and persists the event with its
    /// price snapshot.
    pub async fn create(
        &self,
        request: NewEvent,
        initial_status: EventStatus,
    ) -> LifecycleResult<Event> {
        if !matches!(initial_status, EventStatus::Booked | EventStatus::Reserved) {
            return Err(LifecycleError::InvalidInitialStatus(initial_status));
        }
        if request.event_venues.is_empty() {
            return Err(LifecycleError::EmptyVenues);
        }

        let query = AvailabilityQuery {
            date: request.event_date,
            time: request.event_time,
            venues: request.event_venues.clone(),
        };
        let answer = self
            .availability
            .check(&query, None)
            .await
            .map_err(LifecycleError::Storage)?;
        if let Some(conflicting) = answer.conflicting {
            return Err(LifecycleError::AvailabilityConflict { conflicting });
        }

        let priced = self
            .price_selections(
                request.package,
                &request.menu_additional,
                &request.charges,
                &request.discounts,
            )
            .await?;

        let event = Event {
            // Placeholder; the repository assigns the real id on insert.
            id: EventId::new(0),
            status: initial_status,
            client_name: request.client_name,
            client_mobile_number: request.client_mobile_number,
            rep_name: request.rep_name,
            rep_mobile_number: request.rep_mobile_number,
            event_type: request.event_type,
            event_date: request.event_date,
            event_time: request.event_time,
            num_of_pax: request.num_of_pax,
            event_venues: request.event_venues,
            package: priced.package,
            menu_additional: priced.menu_additional,
            transaction_charges: priced.transaction_charges,
            transaction_discounts: priced.transaction_discounts,
            total_prices: priced.total_prices,
            cancel_reason: None,
        };

        let created = self.repo.insert(event).await.map_err(storage_error)?;
        self.record(format!(
            "Created event {} ({}) for {} on {} {}",
            created.id, created.status, created.client_name, created.event_date, created.event_time
        ));
        Ok(created)
    }

    /// Apply a status transition.
    ///
    /// Allowed targets: `reserved` (promotion, from `booked` only),
    /// `cancelled` (requires a non-empty reason), `finished`. Terminal
    /// events reject every transition.
    pub async fn transition(
        &self,
        id: EventId,
        target: EventStatus,
        reason: Option<&str>,
    ) -> LifecycleResult<Event> {
        let event = self.load(id).await?;
        if event.status.is_terminal() {
            return Err(LifecycleError::TerminalState {
                id,
                status: event.status,
            });
        }

        let cancel_reason = match target {
            EventStatus::Reserved if event.status == EventStatus::Booked => None,
            EventStatus::Finished => None,
            EventStatus::Cancelled => {
                let reason = reason.map(str::trim).unwrap_or("");
                if reason.is_empty() {
                    return Err(LifecycleError::MissingCancelReason);
                }
                Some(reason.to_string())
            }
            _ => {
                return Err(LifecycleError::InvalidTransition {
                    id,
                    from: event.status,
                    to: target,
                })
            }
        };

        let updated = self
            .repo
            .update_status(id, target, cancel_reason)
            .await
            .map_err(storage_error)?;

        self.record(match target {
            EventStatus::Reserved => format!("Promoted event {} to reservation", id),
            EventStatus::Cancelled => format!("Cancelled event {}", id),
            EventStatus::Finished => format!("Finished event {}", id),
            EventStatus::Booked => unreachable!("booked is never a transition target"),
        });
        Ok(updated)
    }

    /// Promote a pencil booking to a reservation.
    pub async fn promote(&self, id: EventId) -> LifecycleResult<Event> {
        self.transition(id, EventStatus::Reserved, None).await
    }

    /// Cancel a non-terminal event, recording the reason.
    pub async fn cancel(&self, id: EventId, reason: &str) -> LifecycleResult<Event> {
        self.transition(id, EventStatus::Cancelled, Some(reason))
            .await
    }

    /// Mark a non-terminal event as finished.
    pub async fn finish(&self, id: EventId) -> LifecycleResult<Event> {
        self.transition(id, EventStatus::Finished, None).await
    }

    /// Edit a non-terminal event.
    ///
    /// A changed scheduling field (date, time, venues) triggers a fresh
    /// availability check excluding the event itself. Pricing-relevant
    /// selections trigger a re-price against the catalog; otherwise the
    /// stored `total_prices` snapshot is left untouched.
    pub async fn update(&self, id: EventId, patch: EventPatch) -> LifecycleResult<Event> {
        let event = self.load(id).await?;
        if event.status.is_terminal() {
            return Err(LifecycleError::TerminalState {
                id,
                status: event.status,
            });
        }
        if let Some(ref venues) = patch.event_venues {
            if venues.is_empty() {
                return Err(LifecycleError::EmptyVenues);
            }
        }

        let new_date = patch.event_date.unwrap_or(event.event_date);
        let new_time = patch.event_time.unwrap_or(event.event_time);
        let new_venues = patch
            .event_venues
            .clone()
            .unwrap_or_else(|| event.event_venues.clone());

        let scheduling_changed = new_date != event.event_date
            || new_time != event.event_time
            || new_venues != event.event_venues;
        if scheduling_changed {
            let query = AvailabilityQuery {
                date: new_date,
                time: new_time,
                venues: new_venues.clone(),
            };
            let answer = self
                .availability
                .check(&query, Some(id))
                .await
                .map_err(LifecycleError::Storage)?;
            if let Some(conflicting) = answer.conflicting {
                return Err(LifecycleError::AvailabilityConflict { conflicting });
            }
        }

        let mut updated = event.clone();
        updated.event_date = new_date;
        updated.event_time = new_time;
        updated.event_venues = new_venues;
        if let Some(name) = patch.client_name.clone() {
            updated.client_name = name;
        }
        if let Some(number) = patch.client_mobile_number.clone() {
            updated.client_mobile_number = number;
        }
        if let Some(name) = patch.rep_name.clone() {
            updated.rep_name = name;
        }
        if let Some(number) = patch.rep_mobile_number.clone() {
            updated.rep_mobile_number = number;
        }
        if let Some(kind) = patch.event_type.clone() {
            updated.event_type = kind;
        }
        if let Some(pax) = patch.num_of_pax {
            updated.num_of_pax = pax;
        }

        if patch.touches_pricing() {
            let package = patch.package.unwrap_or(event.package.id);
            let menu: Vec<MenuSelection> = patch.menu_additional.clone().unwrap_or_else(|| {
                event
                    .menu_additional
                    .iter()
                    .map(|line| MenuSelection {
                        food_item: line.food_item,
                        quantity: line.food_quantity,
                    })
                    .collect()
            });
            let charges: Vec<ChargeSelection> = patch.charges.clone().unwrap_or_else(|| {
                event
                    .transaction_charges
                    .iter()
                    .map(|line| ChargeSelection {
                        name: line.charge_name.clone(),
                        quantity: line.charge_quantity,
                    })
                    .collect()
            });
            let discounts: Vec<String> = patch.discounts.clone().unwrap_or_else(|| {
                event
                    .transaction_discounts
                    .iter()
                    .map(|line| line.discount_name.clone())
                    .collect()
            });

            let priced = self
                .price_selections(package, &menu, &charges, &discounts)
                .await?;
            updated.package = priced.package;
            updated.menu_additional = priced.menu_additional;
            updated.transaction_charges = priced.transaction_charges;
            updated.transaction_discounts = priced.transaction_discounts;
            updated.total_prices = priced.total_prices;
        }

        let persisted = self
            .repo
            .update_fields(id, updated)
            .await
            .map_err(storage_error)?;

        self.record(format!(
            "Modified event {} (fields: {})",
            id,
            patch.modified_fields().join(", ")
        ));
        Ok(persisted)
    }

    async fn load(&self, id: EventId) -> LifecycleResult<Event> {
        match self.repo.get(id).await {
            Ok(event) => Ok(event),
            Err(RepositoryError::NotFound(_)) => Err(LifecycleError::NotFound(id)),
            Err(other) => Err(LifecycleError::Storage(other)),
        }
    }

    /// Resolve catalog snapshots for the selections and price them.
    async fn price_selections(
        &self,
        package_id: i64,
        menu: &[MenuSelection],
        charges: &[ChargeSelection],
        discounts: &[String],
    ) -> LifecycleResult<PricedEvent> {
        let package = self
            .catalog
            .get_package(package_id)
            .await
            .map_err(catalog_error)?;

        let mut food_pairs = Vec::with_capacity(menu.len());
        let mut food_items = Vec::with_capacity(menu.len());
        for selection in menu {
            let item = self
                .catalog
                .get_food_item(selection.food_item)
                .await
                .map_err(catalog_error)?;
            food_pairs.push((item.price, selection.quantity));
            food_items.push(item);
        }

        let mut charge_pairs = Vec::with_capacity(charges.len());
        let mut charge_entries = Vec::with_capacity(charges.len());
        for selection in charges {
            let charge = self
                .catalog
                .get_charge(&selection.name)
                .await
                .map_err(catalog_error)?;
            charge_pairs.push((charge.price, selection.quantity));
            charge_entries.push(charge);
        }

        let mut rates = Vec::with_capacity(discounts.len());
        for name in discounts {
            let discount = self
                .catalog
                .get_discount(name)
                .await
                .map_err(catalog_error)?;
            rates.push(discount.rate);
        }

        let priced = pricing::price_event(package.price, &food_pairs, &charge_pairs, &rates)?;

        let menu_additional = menu
            .iter()
            .zip(food_items.iter())
            .zip(priced.food_line_costs.iter())
            .map(|((selection, item), &cost)| MenuLine {
                food_item: item.id,
                food_name: item.name.clone(),
                food_quantity: selection.quantity,
                food_cost: cost,
            })
            .collect();

        let transaction_charges = charges
            .iter()
            .zip(charge_entries.iter())
            .map(|(selection, charge)| ChargeLine {
                charge_name: charge.name.clone(),
                charge_quantity: selection.quantity,
                charge_price: charge.price,
            })
            .collect();

        let transaction_discounts = discounts
            .iter()
            .zip(priced.discount_amounts.iter())
            .map(|(name, &amount)| DiscountLine {
                discount_name: name.clone(),
                discount_price: amount,
            })
            .collect();

        Ok(PricedEvent {
            package: PackageSnapshot {
                id: package.id,
                name: package.name,
                price: package.price,
            },
            menu_additional,
            transaction_charges,
            transaction_discounts,
            total_prices: priced.totals,
        })
    }

    /// Emit an activity line; sink failures are logged, never fatal.
    fn record(&self, description: String) {
        if let Err(err) = self.audit.record(&description) {
            warn!("failed to record activity '{}': {}", description, err);
        }
    }
}
