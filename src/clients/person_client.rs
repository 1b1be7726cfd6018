use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{sort_people, Person};
use crate::person_actor::PersonError;

/// Client for the person store. This is the persistence gateway used by the
/// view model: every call is a request/response round trip to the actor.
#[derive(Clone)]
pub struct PersonClient {
    inner: ResourceClient<Person>,
}

impl PersonClient {
    pub fn new(inner: ResourceClient<Person>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: String) -> Result<Option<Person>, PersonError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    /// Inserts with the person's own id; an existing id aborts the insert.
    #[instrument(fields(person_id = %person.short_id()), skip(self, person))]
    pub async fn create(&self, person: Person) -> Result<(), PersonError> {
        debug!("Sending request");
        self.inner.create(person).await?;
        Ok(())
    }

    #[instrument(fields(count = people.len()), skip(self, people))]
    pub async fn create_all(&self, people: Vec<Person>) -> Result<usize, PersonError> {
        debug!("Sending request");
        Ok(self.inner.create_all(people).await?)
    }

    #[instrument(fields(person_id = %person.short_id()), skip(self, person))]
    pub async fn update(&self, person: Person) -> Result<Person, PersonError> {
        debug!("Sending request");
        Ok(self.inner.update(person).await?)
    }

    #[instrument(fields(person_id = %person.short_id()), skip(self, person))]
    pub async fn remove(&self, person: &Person) -> Result<(), PersonError> {
        debug!("Sending request");
        Ok(self.inner.delete(person.id.clone()).await?)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<usize, PersonError> {
        debug!("Sending request");
        Ok(self.inner.count().await?)
    }

    /// All stored people in no particular order.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Person>, PersonError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn fetch_sorted(&self) -> Result<Vec<Person>, PersonError> {
        let mut people = self.fetch_all().await?;
        sort_people(&mut people);
        Ok(people)
    }

    /// Observable read: the receiver sees the full contents after every commit.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<Person>>, PersonError> {
        debug!("Sending request");
        Ok(self.inner.subscribe().await?)
    }
}
