/// Appointment aggregate
pub mod aggregate;

/// Current/history split
pub mod buckets;

/// Commands
pub mod commands;

/// Events
pub mod events;

/// Input DTOs
pub mod inputs;

/// Sessions, slots and calendar
pub mod schedule;

/// View (read model)
pub mod view;

/// CQRS setup
pub mod cqrs;

pub use aggregate::{
    Appointment, AppointmentStatus, BookingStep, DoctorRef, PaymentStatus, Services,
    AGGREGATE_TYPE, BOOKING_FEE,
};
pub use buckets::Buckets;
pub use commands::Command;
pub use events::Event;
pub use schedule::{CalendarDay, CalendarMonth, TimeSession};
pub use view::{Query, Repository, View};
