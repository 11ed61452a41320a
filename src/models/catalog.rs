//! Catalog entity snapshots.
//!
//! Catalog CRUD is owned elsewhere; the booking core only reads the
//! price/name/rate fields of these entities at the moment an event is
//! priced. Prices captured from the catalog are copied onto the event
//! (snapshot pricing), so later catalog changes never rewrite receipts.

use serde::{Deserialize, Serialize};

/// An event package (venue dressing, base menu, staffing) with a flat price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// A food item that can be added on top of a package, priced per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// An extra charge (corkage, overtime, equipment) with a unit price.
/// Charges are keyed by name in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub name: String,
    pub price: f64,
}

/// A discount, expressed as a fraction of the gross subtotal in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub name: String,
    pub rate: f64,
}
