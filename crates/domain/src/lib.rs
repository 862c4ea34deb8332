//! CareHub Domain Models

/// Appointment aggregate and booking wizard
pub mod appointments;

/// Doctors, hospitals and medicines reference data
pub mod catalog;

/// Wall clock used by aggregates
pub mod clock;

/// Domain errors
pub mod errors;

/// Domain events wrapper
pub mod event;

/// In-memory view storage
pub mod memory;

/// Cart and order aggregate
pub mod orders;

/// Catalog search and suggestions
pub mod search;

/// Users, medical profile and health timeline
pub mod users;

/// Form field validation
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{Error, FieldError};
pub use event::{DomainEvent, EventLog};
