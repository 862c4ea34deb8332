use std::sync::Arc;

use cqrs_es::{mem_store::MemStore, CqrsFramework};

use crate::event::EventLog;

use super::{Appointment, Query, Repository, Services};

pub type Framework = CqrsFramework<Appointment, MemStore<Appointment>>;

pub fn init(repo: Arc<Repository>, event_log: EventLog, services: Services) -> Arc<Framework> {
    let store = MemStore::<Appointment>::default();

    let queries: Vec<Box<dyn cqrs_es::Query<Appointment>>> =
        vec![Box::new(Query::new(repo)), Box::new(event_log)];

    Arc::new(CqrsFramework::new(store, queries, services))
}

pub fn init_repo() -> Arc<Repository> {
    Arc::new(Repository::default())
}
