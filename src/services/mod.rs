//! Business logic for the booking core.
//!
//! Services are constructed with their storage handles injected and
//! stay free of transport concerns; the HTTP layer is a thin shell
//! over this module.

pub mod audit;
pub mod availability;
pub mod calendar;
pub mod lifecycle;
pub mod pricing;

pub use audit::{AuditError, AuditSink, LogAudit, MemoryAudit};
pub use availability::{Availability, AvailabilityChecker, AvailabilityQuery};
pub use calendar::{
    month_view, project_month, CalendarCell, CalendarError, CalendarResult, MonthGrid,
    MonthViewError,
};
pub use lifecycle::{EventLifecycle, LifecycleError, LifecycleResult};
pub use pricing::{PricedSelections, PricingError, PricingResult};
