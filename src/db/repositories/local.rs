//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository traits
//! suitable for unit testing and local development. All data is stored
//! in memory using HashMap structures, providing fast, deterministic,
//! and isolated execution.
//!
//! The booking constraint (no two non-terminal events on intersecting
//! venue sets in the same date/slot) is enforced inside the write lock,
//! so concurrent creates racing past the advisory availability check are
//! rejected here with [`RepositoryError::Conflict`].

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::{
    CatalogLookup, DateSort, EventFilter, EventRepository, RepositoryError, RepositoryResult,
};
use crate::models::{
    venues_overlap, Charge, Discount, Event, EventId, EventRef, EventStatus, FoodItem, Package,
    TimeSlot, Venue,
};

/// In-memory local repository.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    events: HashMap<EventId, Event>,
    next_event_id: i64,

    // Catalog entities, externally owned; seeded via the helpers below.
    packages: HashMap<i64, Package>,
    food_items: HashMap<i64, FoodItem>,
    charges: HashMap<String, Charge>,
    discounts: HashMap<String, Discount>,

    // Connection health, toggled by tests to simulate outages.
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            events: HashMap::new(),
            next_event_id: 1,
            packages: HashMap::new(),
            food_items: HashMap::new(),
            charges: HashMap::new(),
            discounts: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Seed a catalog package.
    pub fn add_package(&self, package: Package) {
        let mut data = self.data.write().unwrap();
        data.packages.insert(package.id, package);
    }

    /// Seed a catalog food item.
    pub fn add_food_item(&self, item: FoodItem) {
        let mut data = self.data.write().unwrap();
        data.food_items.insert(item.id, item);
    }

    /// Seed a catalog charge.
    pub fn add_charge(&self, charge: Charge) {
        let mut data = self.data.write().unwrap();
        data.charges.insert(charge.name.clone(), charge);
    }

    /// Seed a catalog discount.
    pub fn add_discount(&self, discount: Discount) {
        let mut data = self.data.write().unwrap();
        data.discounts.insert(discount.name.clone(), discount);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all events and catalog entries.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let healthy = data.is_healthy;
        *data = LocalData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of events stored (any status).
    pub fn event_count(&self) -> usize {
        self.data.read().unwrap().events.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Repository is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Find a non-terminal event occupying an overlapping venue in the same
/// date/slot, skipping `exclude`. Must be called with the lock held so
/// the answer stays valid for the duration of the write.
fn conflicting_ref(
    data: &LocalData,
    date: NaiveDate,
    slot: TimeSlot,
    venues: &[Venue],
    exclude: Option<EventId>,
) -> Option<EventRef> {
    data.events
        .values()
        .filter(|e| !e.status.is_terminal())
        .filter(|e| Some(e.id) != exclude)
        .find(|e| {
            e.event_date == date
                && e.event_time == slot
                && venues_overlap(&e.event_venues, venues)
        })
        .map(Event::to_ref)
}

fn sort_events(events: &mut [Event], sort: Option<DateSort>) {
    match sort {
        Some(DateSort::Ascending) => events.sort_by_key(|e| (e.event_date, e.id)),
        Some(DateSort::Descending) => {
            events.sort_by_key(|e| (std::cmp::Reverse(e.event_date), e.id))
        }
        None => events.sort_by_key(|e| e.id),
    }
}

#[async_trait]
impl EventRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn find(&self, filter: &EventFilter) -> RepositoryResult<Vec<Event>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut events: Vec<Event> = data
            .events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        sort_events(&mut events, filter.sort);
        Ok(events)
    }

    async fn find_one(&self, filter: &EventFilter) -> RepositoryResult<Option<Event>> {
        let mut events = self.find(filter).await?;
        if events.is_empty() {
            Ok(None)
        } else {
            Ok(Some(events.swap_remove(0)))
        }
    }

    async fn get(&self, id: EventId) -> RepositoryResult<Event> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.events
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Event {} not found", id)))
    }

    async fn insert(&self, mut event: Event) -> RepositoryResult<Event> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if !event.status.is_terminal() {
            if let Some(conflicting) = conflicting_ref(
                &data,
                event.event_date,
                event.event_time,
                &event.event_venues,
                None,
            ) {
                return Err(RepositoryError::Conflict { conflicting });
            }
        }

        event.id = EventId::new(data.next_event_id);
        data.next_event_id += 1;
        data.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update_status(
        &self,
        id: EventId,
        status: EventStatus,
        cancel_reason: Option<String>,
    ) -> RepositoryResult<Event> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        let event = data
            .events
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Event {} not found", id)))?;
        event.status = status;
        if status == EventStatus::Cancelled {
            event.cancel_reason = cancel_reason;
        }
        Ok(event.clone())
    }

    async fn update_fields(&self, id: EventId, mut event: Event) -> RepositoryResult<Event> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if !data.events.contains_key(&id) {
            return Err(RepositoryError::NotFound(format!("Event {} not found", id)));
        }

        if !event.status.is_terminal() {
            if let Some(conflicting) = conflicting_ref(
                &data,
                event.event_date,
                event.event_time,
                &event.event_venues,
                Some(id),
            ) {
                return Err(RepositoryError::Conflict { conflicting });
            }
        }

        event.id = id;
        data.events.insert(id, event.clone());
        Ok(event)
    }
}

#[async_trait]
impl CatalogLookup for LocalRepository {
    async fn get_package(&self, id: i64) -> RepositoryResult<Package> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.packages
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Package {} not found", id)))
    }

    async fn get_food_item(&self, id: i64) -> RepositoryResult<FoodItem> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.food_items
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Food item {} not found", id)))
    }

    async fn get_charge(&self, name: &str) -> RepositoryResult<Charge> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.charges
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Charge '{}' not found", name)))
    }

    async fn get_discount(&self, name: &str) -> RepositoryResult<Discount> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.discounts
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Discount '{}' not found", name)))
    }

    async fn list_packages(&self) -> RepositoryResult<Vec<Package>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut packages: Vec<Package> = data.packages.values().cloned().collect();
        packages.sort_by_key(|p| p.id);
        Ok(packages)
    }

    async fn list_food_items(&self) -> RepositoryResult<Vec<FoodItem>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut items: Vec<FoodItem> = data.food_items.values().cloned().collect();
        items.sort_by_key(|f| f.id);
        Ok(items)
    }

    async fn list_charges(&self) -> RepositoryResult<Vec<Charge>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut charges: Vec<Charge> = data.charges.values().cloned().collect();
        charges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(charges)
    }

    async fn list_discounts(&self) -> RepositoryResult<Vec<Discount>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut discounts: Vec<Discount> = data.discounts.values().cloned().collect();
        discounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(discounts)
    }
}
