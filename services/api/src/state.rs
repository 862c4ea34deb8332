use std::{collections::HashMap, sync::Arc};

use domain::{
    appointments::{self, Appointment},
    catalog::Catalog,
    orders::{self, Order},
    Clock, EventLog,
};
use ulid::Ulid;

use crate::{chat::ChatClient, config::Config, error::ApiError, sessions::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub clock: Arc<dyn Clock>,
    pub sessions: Arc<SessionStore>,
    pub appointments_repo: Arc<appointments::Repository>,
    pub appointments_cqrs: Arc<appointments::cqrs::Framework>,
    pub orders_repo: Arc<orders::Repository>,
    pub orders_cqrs: Arc<orders::cqrs::Framework>,
    pub event_log: EventLog,
    pub chat: ChatClient,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, clock: Arc<dyn Clock>) -> Self {
        let event_log = EventLog::default();

        let appointments_repo = appointments::cqrs::init_repo();
        let appointments_cqrs = appointments::cqrs::init(
            appointments_repo.clone(),
            event_log.clone(),
            appointments::Services::new(clock.clone()),
        );

        let orders_repo = orders::cqrs::init_repo();
        let orders_cqrs = orders::cqrs::init(
            orders_repo.clone(),
            event_log.clone(),
            orders::Services::new(clock.clone()),
        );

        Self {
            chat: ChatClient::new(&config.chat_api_url),
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            clock,
            sessions: Arc::new(SessionStore::default()),
            appointments_repo,
            appointments_cqrs,
            orders_repo,
            orders_cqrs,
            event_log,
        }
    }

    /// Appointment owned by `user_id`; other users' appointments read as missing
    pub fn appointment(&self, id: &str, user_id: &str) -> Result<Appointment, ApiError> {
        self.appointments_repo
            .get(id)
            .map(|view| view.aggregate)
            .filter(|a| a.user_id == user_id)
            .ok_or_else(|| ApiError::NotFound(appointments::AGGREGATE_TYPE.to_string()))
    }

    pub fn user_appointments(&self, user_id: &str) -> Vec<Appointment> {
        self.appointments_repo
            .all()
            .into_iter()
            .map(|view| view.aggregate)
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    pub fn order(&self, id: &str, user_id: &str) -> Result<Order, ApiError> {
        self.orders_repo
            .get(id)
            .map(|view| view.aggregate)
            .filter(|o| o.user_id == user_id)
            .ok_or_else(|| ApiError::NotFound(orders::AGGREGATE_TYPE.to_string()))
    }

    /// Newest first
    pub fn user_orders(&self, user_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders_repo
            .all()
            .into_iter()
            .map(|view| view.aggregate)
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        orders
    }
}

/// Metadata attached to every command, tagged with a fresh command id
pub fn command_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("command_id".to_string(), Ulid::new().to_string());
    metadata
}
