//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_delete`] to answer requests by hand.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot, watch};

pub type Responder<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// No `ResourceActor` is started: the test reads the requests the client sends
/// and decides the responses, which makes failures and delays deterministic.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Subscribe request
pub async fn expect_subscribe<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<watch::Receiver<Vec<T>>>> {
    match receiver.recv().await {
        Some(ResourceRequest::Subscribe { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::PersonClient;
    use crate::domain::Person;
    use crate::person_actor::PersonError;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Person>(10);
        let client = PersonClient::new(inner);
        let person = Person::new("Test", "Person");

        let create_task = {
            let person = person.clone();
            tokio::spawn(async move { client.create(person).await })
        };

        let (item, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(item, person);
        responder
            .send(Err(FrameworkError::AlreadyExists(item.id.clone())))
            .unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Err(PersonError::AlreadyExists(person.id)));
    }
}
