pub mod appointments;
pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod events;
pub mod orders;
pub mod session;
