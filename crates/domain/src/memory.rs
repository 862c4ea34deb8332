use std::{
    collections::HashMap,
    fmt::Debug,
    marker::PhantomData,
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;
use cqrs_es::{
    persist::{PersistenceError, ViewContext, ViewRepository},
    Aggregate, EventEnvelope, Query, View,
};
use serde::{Deserialize, Serialize};

/// View repository backed by a process-local map.
///
/// Versions are checked on update the same way a persistent repository
/// would, so concurrent projections of one aggregate cannot overwrite each
/// other silently.
pub struct InMemoryViewRepository<V, A> {
    views: RwLock<HashMap<String, (V, i64)>>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<V, A> Default for InMemoryViewRepository<V, A> {
    fn default() -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            _aggregate: PhantomData,
        }
    }
}

impl<V: Clone, A> InMemoryViewRepository<V, A> {
    pub fn all(&self) -> Vec<V> {
        self.views
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|(view, _)| view.clone())
            .collect()
    }

    pub fn get(&self, view_id: &str) -> Option<V> {
        self.views
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(view_id)
            .map(|(view, _)| view.clone())
    }
}

#[async_trait]
impl<V, A> ViewRepository<V, A> for InMemoryViewRepository<V, A>
where
    V: View<A> + Clone,
    A: Aggregate,
{
    async fn load(&self, view_id: &str) -> Result<Option<V>, PersistenceError> {
        Ok(self.get(view_id))
    }

    async fn load_with_context(
        &self,
        view_id: &str,
    ) -> Result<Option<(V, ViewContext)>, PersistenceError> {
        Ok(self
            .views
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(view_id)
            .map(|(view, version)| {
                (view.clone(), ViewContext::new(view_id.to_string(), *version))
            }))
    }

    async fn update_view(&self, view: V, context: ViewContext) -> Result<(), PersistenceError> {
        let mut views = self.views.write().unwrap_or_else(PoisonError::into_inner);
        let current = views.get(&context.view_instance_id).map(|(_, v)| *v).unwrap_or(0);
        if current != context.version {
            return Err(PersistenceError::OptimisticLockError);
        }
        views.insert(context.view_instance_id, (view, context.version + 1));
        Ok(())
    }
}

/// Read model holding the latest state of one aggregate instance
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AggregateView<A> {
    pub aggregate_type: String,
    pub command_id: String,
    pub id: String,
    pub aggregate: A,
}

impl<A: Aggregate + Clone + Debug> View<A> for AggregateView<A> {
    fn update(&mut self, event: &EventEnvelope<A>) {
        self.id.clone_from(&event.aggregate_id);
        self.aggregate_type = A::aggregate_type();
        self.command_id = event
            .metadata
            .get("command_id")
            .cloned()
            .unwrap_or_default();
        self.aggregate.apply(event.payload.clone());
    }
}

/// Projects committed events into an [`InMemoryViewRepository`]
pub struct ViewQuery<A> {
    repo: Arc<InMemoryViewRepository<AggregateView<A>, A>>,
}

impl<A: Aggregate + Clone + Debug> ViewQuery<A> {
    pub fn new(repo: Arc<InMemoryViewRepository<AggregateView<A>, A>>) -> Self {
        Self { repo }
    }

    async fn update(&self, view_id: &str, events: &[EventEnvelope<A>]) -> Result<(), PersistenceError> {
        let (mut view, view_context) = match self.repo.load_with_context(view_id).await? {
            None => (AggregateView::default(), ViewContext::new(view_id.to_string(), 0)),
            Some((view, context)) => (view, context),
        };

        for event in events {
            view.update(event);
        }

        self.repo.update_view(view, view_context).await
    }
}

#[async_trait]
impl<A: Aggregate + Clone + Debug> Query<A> for ViewQuery<A> {
    async fn dispatch(&self, aggregate_id: &str, events: &[EventEnvelope<A>]) {
        if let Err(err) = self.update(aggregate_id, events).await {
            tracing::error!("{}Query error for {}: {}", A::aggregate_type(), aggregate_id, err);
        }
    }
}
