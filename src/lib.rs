//! # Event Tracker Core
//!
//! Booking core for a venue/catering business. Clients reserve a date,
//! time slot, and one or more venues for an event composed of a package,
//! additional food items, and extra charges, net of discounts.
//!
//! ## Features
//!
//! - **Pricing**: itemized and total cost computation with snapshot pricing
//! - **Availability**: conflict detection across date / time slot / venue set
//! - **Lifecycle**: the booking state machine (pencil booking → reservation →
//!   completion, or cancellation at any point)
//! - **Calendar**: month-grid projection with per-slot-per-venue occupancy
//! - **HTTP API**: RESTful endpoints for UI layers
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: domain types (events, catalog snapshots, venues, time slots)
//! - [`db`]: repository traits, typed errors, and storage backends
//! - [`services`]: pricing, availability, lifecycle, and calendar logic
//! - [`http`]: axum-based HTTP server and request handlers
//! - [`config`]: server and repository configuration

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
