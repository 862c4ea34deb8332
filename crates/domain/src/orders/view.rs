use crate::memory::{AggregateView, InMemoryViewRepository, ViewQuery};

use super::Order;

pub type View = AggregateView<Order>;

pub type Repository = InMemoryViewRepository<View, Order>;

pub type Query = ViewQuery<Order>;
