use std::sync::Arc;

use cqrs_es::{mem_store::MemStore, CqrsFramework};

use crate::event::EventLog;

use super::{Order, Query, Repository, Services};

pub type Framework = CqrsFramework<Order, MemStore<Order>>;

pub fn init(repo: Arc<Repository>, event_log: EventLog, services: Services) -> Arc<Framework> {
    let queries: Vec<Box<dyn cqrs_es::Query<Order>>> =
        vec![Box::new(Query::new(repo)), Box::new(event_log)];

    Arc::new(CqrsFramework::new(MemStore::<Order>::default(), queries, services))
}

pub fn init_repo() -> Arc<Repository> {
    Arc::new(Repository::default())
}
