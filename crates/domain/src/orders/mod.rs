/// Order aggregate
pub mod aggregate;

/// Cart and totals
pub mod cart;

/// Commands
pub mod commands;

/// Events
pub mod events;

/// Input DTOs
pub mod inputs;

/// View (read model)
pub mod view;

/// CQRS setup
pub mod cqrs;

pub use aggregate::{DeliveryDetails, Order, PaymentMethod, Services, AGGREGATE_TYPE};
pub use cart::{Cart, CartItem, CartTotals, OrderLine, DELIVERY_FEE, MAX_QUANTITY};
pub use commands::Command;
pub use events::Event;
pub use view::{Query, Repository, View};
