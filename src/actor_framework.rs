use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with lifecycle hooks)
// =============================================================================

/// Trait that any record must implement to be stored by a [`ResourceActor`].
///
/// Ids are assigned by the caller, not by the actor, so a removed record can be
/// inserted again under the same id.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Apply `replacement` to the stored record. The default replaces it wholesale.
    fn on_update(&mut self, replacement: Self) -> Result<(), String> {
        *self = replacement;
        Ok(())
    }

    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Errors produced by the generic actor layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Item rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        item: T,
        respond_to: Response<T::Id>,
    },
    CreateAll {
        items: Vec<T>,
        respond_to: Response<usize>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        item: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<Vec<T>>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the records of one entity type. Every committed mutation publishes the
/// full contents to subscribers.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    changes: watch::Sender<Vec<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = watch::channel(Vec::new());
        let actor = Self {
            receiver,
            store: HashMap::new(),
            changes,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { item, respond_to } => {
                    let _ = respond_to.send(self.handle_create(item));
                }
                ResourceRequest::CreateAll { items, respond_to } => {
                    let _ = respond_to.send(self.handle_create_all(items));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Update { item, respond_to } => {
                    let _ = respond_to.send(self.handle_update(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(Ok(self.changes.subscribe()));
                }
            }
        }

        info!("ResourceActor stopped");
    }

    #[instrument(fields(item_id = %item.id()), skip(self, item))]
    fn handle_create(&mut self, mut item: T) -> Result<T::Id, FrameworkError> {
        let id = item.id().clone();
        if self.store.contains_key(&id) {
            warn!("Insert aborted, id already present");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.insert(id.clone(), item);
        self.publish();
        debug!("Item created");
        Ok(id)
    }

    /// All-or-nothing: nothing is stored if any item is a duplicate or rejected.
    #[instrument(fields(count = items.len()), skip(self, items))]
    fn handle_create_all(&mut self, items: Vec<T>) -> Result<usize, FrameworkError> {
        let mut staged: HashMap<T::Id, T> = HashMap::with_capacity(items.len());
        for mut item in items {
            let id = item.id().clone();
            if self.store.contains_key(&id) || staged.contains_key(&id) {
                warn!(item_id = %id, "Batch insert aborted, id already present");
                return Err(FrameworkError::AlreadyExists(id.to_string()));
            }
            item.on_create().map_err(FrameworkError::Rejected)?;
            staged.insert(id, item);
        }
        let count = staged.len();
        self.store.extend(staged);
        self.publish();
        info!(count, "Batch created");
        Ok(count)
    }

    #[instrument(fields(item_id = %item.id()), skip(self, item))]
    fn handle_update(&mut self, item: T) -> Result<T, FrameworkError> {
        let id = item.id().clone();
        let stored = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        stored.on_update(item).map_err(FrameworkError::Rejected)?;
        let updated = stored.clone();
        self.publish();
        debug!("Item updated");
        Ok(updated)
    }

    #[instrument(fields(item_id = %id), skip(self))]
    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(&id);
        self.publish();
        debug!("Item deleted");
        Ok(())
    }

    fn snapshot(&self) -> Vec<T> {
        self.store.values().cloned().collect()
    }

    fn publish(&self) {
        // send_replace stores the value even while nobody is subscribed
        self.changes.send_replace(self.snapshot());
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, item: T) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { item, respond_to })
            .await
    }

    pub async fn create_all(&self, items: Vec<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::CreateAll { items, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, item: T) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { item, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to })
            .await
    }

    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Subscribe { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
