use crate::clients::{ApiClient, UserClient, WorkoutClient};
use crate::config::AppConfig;
use crate::model::{User, Workout};
use resource_sync::Transport;
use std::rc::Rc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running backends of the app and the clients to reach them.
///
/// ```ignore
/// let system = GymSystem::new(&AppConfig::default());
///
/// let users = UsersPage::new(system.user_transport());
/// users.enter();
/// // ...
/// drop(users);
/// system.shutdown().await?;
/// ```
pub struct GymSystem {
    pub user_client: UserClient,
    pub workout_client: WorkoutClient,
    handles: Vec<JoinHandle<()>>,
}

impl GymSystem {
    /// Spawns the user and workout backends. Must be called inside a Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let (user_actor, user_client) = crate::user_actor::new(config.channel_buffer);
        let (workout_actor, workout_client) = crate::workout_actor::new(config.channel_buffer);

        let user_handle = tokio::spawn(user_actor.run(()));
        let workout_handle = tokio::spawn(workout_actor.run(user_client.clone()));
        info!(buffer = config.channel_buffer, "Backends started");

        Self {
            user_client,
            workout_client,
            handles: vec![workout_handle, user_handle],
        }
    }

    pub fn user_transport(&self) -> Rc<dyn Transport<User>> {
        self.user_client.transport()
    }

    pub fn workout_transport(&self) -> Rc<dyn Transport<Workout>> {
        self.workout_client.transport()
    }

    /// Drops the clients and waits for every backend to stop.
    ///
    /// Returns `Err` if a backend task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down backends...");
        drop(self.user_client);
        drop(self.workout_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Backend task failed: {:?}", e);
                return Err(format!("Backend task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
