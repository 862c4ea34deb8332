use crate::memory::{AggregateView, InMemoryViewRepository, ViewQuery};

use super::Appointment;

pub type View = AggregateView<Appointment>;

pub type Repository = InMemoryViewRepository<View, Appointment>;

pub type Query = ViewQuery<Appointment>;
