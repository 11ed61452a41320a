mod support;

use event_tracker::db::EventRepository;
use event_tracker::models::{EventPatch, EventStatus, MenuSelection, TimeSlot, Venue};
use event_tracker::services::pricing::round2;
use event_tracker::services::LifecycleError;
use support::{booking_request, lifecycle_over, seeded_repository};

#[tokio::test]
async fn test_create_booked_event_with_price_snapshot() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let mut request = booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]);
    request.menu_additional = vec![MenuSelection {
        food_item: 1,
        quantity: 2,
    }];
    request.charges = vec![event_tracker::models::ChargeSelection {
        name: "Corkage".to_string(),
        quantity: 1,
    }];
    request.discounts = vec!["VIP".to_string()];

    let event = lifecycle
        .create(request, EventStatus::Booked)
        .await
        .unwrap();

    assert_eq!(event.status, EventStatus::Booked);
    assert_eq!(event.package.name, "Silver");
    assert_eq!(event.total_prices.packages, 1000.0);
    assert_eq!(event.total_prices.food, 100.0);
    assert_eq!(event.total_prices.charges, 200.0);
    // 15% of the 1300 gross
    assert_eq!(event.total_prices.discounts, 195.0);
    assert_eq!(event.total_prices.all, 1105.0);
    assert_eq!(event.menu_additional[0].food_name, "Lechon Belly");
    assert_eq!(event.menu_additional[0].food_cost, 100.0);
    assert_eq!(event.transaction_discounts[0].discount_price, 195.0);
}

#[tokio::test]
async fn test_stored_breakdown_reconciles() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let mut request = booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]);
    request.menu_additional = vec![MenuSelection {
        food_item: 2,
        quantity: 7,
    }];
    request.discounts = vec!["Promo".to_string()];

    let event = lifecycle
        .create(request, EventStatus::Reserved)
        .await
        .unwrap();
    let t = event.total_prices;
    assert_eq!(t.all, round2(t.packages + t.food + t.charges - t.discounts));
}

#[tokio::test]
async fn test_create_rejects_unknown_catalog_reference() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let mut request = booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]);
    request.package = 999;

    let err = lifecycle
        .create(request, EventStatus::Booked)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::UnknownCatalogItem(_)));
}

#[tokio::test]
async fn test_create_rejects_invalid_initial_status() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let request = booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]);
    let err = lifecycle
        .create(request, EventStatus::Finished)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidInitialStatus(EventStatus::Finished)
    ));
}

#[tokio::test]
async fn test_create_rejects_empty_venue_set() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let request = booking_request(5, TimeSlot::Afternoon, vec![]);
    let err = lifecycle
        .create(request, EventStatus::Booked)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::EmptyVenues));
}

#[tokio::test]
async fn test_overlapping_venue_set_conflicts() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let first = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden, Venue::Sunroom]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    let err = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Sunroom, Venue::Terrace]),
            EventStatus::Booked,
        )
        .await
        .unwrap_err();

    match err {
        LifecycleError::AvailabilityConflict { conflicting } => {
            assert_eq!(conflicting.id, first.id);
            assert_eq!(conflicting.client_name, "Ana Reyes");
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_disjoint_venues_and_other_slots_do_not_conflict() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    // Same slot, disjoint venue
    lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Terrace]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    // Same venue, other slot
    lifecycle
        .create(
            booking_request(5, TimeSlot::Evening, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    // Same venue and slot, other date
    lifecycle
        .create(
            booking_request(6, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancellation_frees_the_slot() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let first = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    let retry = booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]);
    assert!(lifecycle
        .create(retry.clone(), EventStatus::Booked)
        .await
        .is_err());

    let cancelled = lifecycle
        .cancel(first.id, "client postponed")
        .await
        .unwrap();
    assert_eq!(cancelled.status, EventStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("client postponed"));

    lifecycle.create(retry, EventStatus::Booked).await.unwrap();
}

#[tokio::test]
async fn test_cancellation_requires_a_reason() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    let err = lifecycle.cancel(event.id, "   ").await.unwrap_err();
    assert!(matches!(err, LifecycleError::MissingCancelReason));
}

#[tokio::test]
async fn test_terminal_events_reject_every_transition() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    lifecycle.cancel(event.id, "double booked").await.unwrap();

    assert!(matches!(
        lifecycle.cancel(event.id, "again").await.unwrap_err(),
        LifecycleError::TerminalState { .. }
    ));
    assert!(matches!(
        lifecycle.finish(event.id).await.unwrap_err(),
        LifecycleError::TerminalState { .. }
    ));
    assert!(matches!(
        lifecycle.promote(event.id).await.unwrap_err(),
        LifecycleError::TerminalState { .. }
    ));
    assert!(matches!(
        lifecycle
            .update(event.id, EventPatch::default())
            .await
            .unwrap_err(),
        LifecycleError::TerminalState { .. }
    ));
}

#[tokio::test]
async fn test_promotion_only_from_booked() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    let reserved = lifecycle.promote(event.id).await.unwrap();
    assert_eq!(reserved.status, EventStatus::Reserved);

    let err = lifecycle.promote(event.id).await.unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidTransition {
            from: EventStatus::Reserved,
            to: EventStatus::Reserved,
            ..
        }
    ));
}

#[tokio::test]
async fn test_finish_from_either_active_status() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let booked = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    assert_eq!(
        lifecycle.finish(booked.id).await.unwrap().status,
        EventStatus::Finished
    );

    let reserved = lifecycle
        .create(
            booking_request(6, TimeSlot::Evening, vec![Venue::Sunroom]),
            EventStatus::Reserved,
        )
        .await
        .unwrap();
    assert_eq!(
        lifecycle.finish(reserved.id).await.unwrap().status,
        EventStatus::Finished
    );
}

#[tokio::test]
async fn test_reschedule_excludes_self() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    // Re-submitting the same slot must not conflict with the event itself.
    let patch = EventPatch {
        event_date: Some(event.event_date),
        event_time: Some(event.event_time),
        event_venues: Some(event.event_venues.clone()),
        ..Default::default()
    };
    lifecycle.update(event.id, patch).await.unwrap();
}

#[tokio::test]
async fn test_reschedule_into_occupied_slot_conflicts() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let occupant = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    let mover = lifecycle
        .create(
            booking_request(6, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    let patch = EventPatch {
        event_date: Some(occupant.event_date),
        ..Default::default()
    };
    let err = lifecycle.update(mover.id, patch).await.unwrap_err();
    match err {
        LifecycleError::AvailabilityConflict { conflicting } => {
            assert_eq!(conflicting.id, occupant.id);
        }
        other => panic!("expected conflict, got {:?}", other),
    }

    // The failed move leaves the event unchanged.
    let unchanged = repo
        .get(mover.id)
        .await
        .expect("mover still stored");
    assert_eq!(unchanged.event_date, mover.event_date);
}

#[tokio::test]
async fn test_update_reprices_only_when_selections_change() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    assert_eq!(event.total_prices.all, 1000.0);

    // A catalog price change after booking must not leak into a
    // non-pricing update.
    repo.add_package(event_tracker::models::Package {
        id: 1,
        name: "Silver".to_string(),
        price: 9999.0,
    });

    let renamed = lifecycle
        .update(
            event.id,
            EventPatch {
                client_name: Some("Maria Santos".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.client_name, "Maria Santos");
    assert_eq!(renamed.total_prices.all, 1000.0);
    assert_eq!(renamed.package.price, 1000.0);

    // Changing a selection re-prices against the current catalog.
    let repriced = lifecycle
        .update(
            event.id,
            EventPatch {
                menu_additional: Some(vec![MenuSelection {
                    food_item: 1,
                    quantity: 2,
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(repriced.package.price, 9999.0);
    assert_eq!(repriced.total_prices.food, 100.0);
    assert_eq!(repriced.total_prices.all, 10099.0);
}

#[tokio::test]
async fn test_update_rejects_empty_venue_set() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();

    let err = lifecycle
        .update(
            event.id,
            EventPatch {
                event_venues: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::EmptyVenues));
}

#[tokio::test]
async fn test_audit_trail_records_mutations() {
    let repo = seeded_repository();
    let (lifecycle, audit) = lifecycle_over(&repo);

    let event = lifecycle
        .create(
            booking_request(5, TimeSlot::Afternoon, vec![Venue::Garden]),
            EventStatus::Booked,
        )
        .await
        .unwrap();
    lifecycle.promote(event.id).await.unwrap();
    lifecycle.finish(event.id).await.unwrap();

    let entries = audit.entries();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].contains("Created event"));
    assert!(entries[1].contains("Promoted event"));
    assert!(entries[2].contains("Finished event"));
}

#[tokio::test]
async fn test_not_found_surfaces_the_id() {
    let repo = seeded_repository();
    let (lifecycle, _audit) = lifecycle_over(&repo);

    let missing = event_tracker::models::EventId::new(42);
    let err = lifecycle.finish(missing).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound(id) if id == missing));
}
