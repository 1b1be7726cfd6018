use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::PersonClient;
use crate::domain::Person;
use crate::person_actor::PersonError;
use crate::view_model::{ErrorChannel, PersonViewModel};

use super::{seed_if_empty, RosterConfig};

/// Owns the person store actor and hands out the pieces that talk to it.
pub struct RosterSystem {
    pub person_client: PersonClient,
    config: RosterConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RosterSystem {
    /// Starts the store actor and, when configured, seeds an empty store.
    #[instrument(name = "roster_system", skip(config))]
    pub async fn start(config: RosterConfig) -> Result<Self, PersonError> {
        info!("Starting roster system");
        if config.buffer_size == 0 {
            error!("Request buffer size must be at least 1");
            return Err(PersonError::ValidationError(
                "buffer size must be at least 1".to_string(),
            ));
        }

        let (person_actor, inner) = ResourceActor::<Person>::new(config.buffer_size);
        let handle = tokio::spawn(person_actor.run());
        let person_client = PersonClient::new(inner);

        if config.seed_on_start {
            seed_if_empty(&person_client).await?;
        }

        info!("Roster system started successfully");
        Ok(Self {
            person_client,
            config,
            handles: vec![handle],
        })
    }

    /// A view model wired to this system's store, with its own error channel.
    pub fn view_model(&self) -> PersonViewModel {
        PersonViewModel::new(
            self.person_client.clone(),
            self.config.validator(),
            ErrorChannel::new(self.config.notice_duration),
        )
    }

    /// Drops the system's client and waits for the actor to stop. The actor
    /// stops once every client clone, including those held by view models,
    /// has been dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down roster system");
        drop(self.person_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Roster system shutdown complete");
        Ok(())
    }
}
