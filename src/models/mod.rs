//! Domain model types for the booking core.
//!
//! Events are the central entity; catalog entities (packages, food items,
//! charges, discounts) are externally owned and only read here as price
//! snapshots at the moment of pricing computation.

pub mod catalog;
pub mod event;
pub mod venue;

pub use catalog::{Charge, Discount, FoodItem, Package};
pub use event::{
    ChargeLine, ChargeSelection, DiscountLine, Event, EventId, EventPatch, EventRef, EventStatus,
    MenuLine, MenuSelection, NewEvent, PackageSnapshot, TotalPrices,
};
pub use venue::{venues_overlap, ParseLabelError, TimeSlot, Venue};
