//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use event_tracker::db::LocalRepository;
use event_tracker::models::{
    Charge, Discount, Event, EventId, EventStatus, FoodItem, NewEvent, Package, PackageSnapshot,
    TimeSlot, TotalPrices, Venue,
};
use event_tracker::services::{EventLifecycle, MemoryAudit};

/// Catalog seeded into every test repository.
pub fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_package(Package {
        id: 1,
        name: "Silver".to_string(),
        price: 1000.0,
    });
    repo.add_package(Package {
        id: 2,
        name: "Gold".to_string(),
        price: 2500.0,
    });
    repo.add_food_item(FoodItem {
        id: 1,
        name: "Lechon Belly".to_string(),
        price: 50.0,
    });
    repo.add_food_item(FoodItem {
        id: 2,
        name: "Pancit Canton".to_string(),
        price: 25.5,
    });
    repo.add_charge(Charge {
        name: "Corkage".to_string(),
        price: 200.0,
    });
    repo.add_charge(Charge {
        name: "Overtime".to_string(),
        price: 500.0,
    });
    repo.add_discount(Discount {
        name: "VIP".to_string(),
        rate: 0.15,
    });
    repo.add_discount(Discount {
        name: "Promo".to_string(),
        rate: 0.10,
    });
    repo
}

/// Lifecycle over a repository, capturing audit lines in memory.
pub fn lifecycle_over(repo: &LocalRepository) -> (EventLifecycle, MemoryAudit) {
    let audit = MemoryAudit::new();
    let lifecycle = EventLifecycle::new(
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        Arc::new(audit.clone()),
    );
    (lifecycle, audit)
}

/// A minimal creation request for the given slot.
pub fn booking_request(day: u32, slot: TimeSlot, venues: Vec<Venue>) -> NewEvent {
    NewEvent {
        client_name: "Ana Reyes".to_string(),
        client_mobile_number: "09171234567".to_string(),
        rep_name: "Ben Cruz".to_string(),
        rep_mobile_number: "09179876543".to_string(),
        event_type: "Wedding".to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
        event_time: slot,
        num_of_pax: 80,
        event_venues: venues,
        package: 1,
        menu_additional: Vec::new(),
        charges: Vec::new(),
        discounts: Vec::new(),
    }
}

/// A fully materialized event for direct repository insertion, bypassing
/// the lifecycle.
pub fn stored_event(day: u32, slot: TimeSlot, venues: Vec<Venue>) -> Event {
    Event {
        id: EventId::new(0),
        status: EventStatus::Booked,
        client_name: "Ana Reyes".to_string(),
        client_mobile_number: "09171234567".to_string(),
        rep_name: "Ben Cruz".to_string(),
        rep_mobile_number: "09179876543".to_string(),
        event_type: "Wedding".to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
        event_time: slot,
        num_of_pax: 80,
        event_venues: venues,
        package: PackageSnapshot {
            id: 1,
            name: "Silver".to_string(),
            price: 1000.0,
        },
        menu_additional: Vec::new(),
        transaction_charges: Vec::new(),
        transaction_discounts: Vec::new(),
        total_prices: TotalPrices {
            packages: 1000.0,
            food: 0.0,
            charges: 0.0,
            discounts: 0.0,
            all: 1000.0,
        },
        cancel_reason: None,
    }
}
