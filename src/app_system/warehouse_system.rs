use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::actor_framework::{HttpActor, HttpClient, ResourceClient};
use crate::app_system::SystemError;
use crate::clients::{InventoryClient, OrderClient};
use crate::config::Config;
use crate::debounce::{DebounceGate, Debounced};
use crate::session::{Role, Session};

const TRANSPORT_BUFFER: usize = 64;

/// Wires the transport actor to the resource clients and owns the signed-in
/// session.
///
/// Shutdown drops the clients this system holds; clones handed out elsewhere
/// keep the transport alive until they are dropped too.
pub struct WarehouseSystem {
    pub inventory_client: InventoryClient,
    pub order_client: OrderClient,
    config: Config,
    session: Option<Session>,
    handles: Vec<JoinHandle<()>>,
}

impl WarehouseSystem {
    /// Spawns the HTTP actor. Must be called inside a Tokio runtime.
    #[instrument(name = "warehouse_system", skip(config), fields(base_url = %config.api_base_url))]
    pub fn start(config: Config) -> Result<Self, SystemError> {
        info!("Starting warehouse client");
        let (actor, http) = HttpActor::new(TRANSPORT_BUFFER, &config)?;
        let handle = tokio::spawn(actor.run());
        Ok(Self::with_transport(http, config, vec![handle]))
    }

    /// Builds the clients over an existing transport handle.
    pub fn with_transport(http: HttpClient, config: Config, handles: Vec<JoinHandle<()>>) -> Self {
        let inventory_client = InventoryClient::new(ResourceClient::new(http.clone()));
        let order_client = OrderClient::new(ResourceClient::new(http.clone()), ResourceClient::new(http));
        Self {
            inventory_client,
            order_client,
            config,
            session: None,
            handles,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(skip(self, user))]
    pub fn sign_in(&mut self, user: impl Into<String>, role: Role) -> &Session {
        let session = Session::new(user, role);
        info!(user = %session.user, "Signed in");
        self.session.insert(session)
    }

    pub fn sign_out(&mut self) -> Option<Session> {
        let session = self.session.take();
        if let Some(session) = &session {
            info!(user = %session.user, "Signed out");
        }
        session
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// A debounce gate for a search box, using the configured delay.
    pub fn debounced_search(&self, initial: impl Into<String>) -> Debounced<String> {
        DebounceGate::spawn(initial.into(), self.config.debounce_delay)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(mut self) -> Result<(), SystemError> {
        info!("Shutting down warehouse client");
        self.sign_out();

        // Dropping the clients closes the transport channel.
        drop(self.inventory_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Task failed during shutdown");
                return Err(SystemError::Task(e.to_string()));
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::create_mock_http;
    use crate::session::Permission;

    #[tokio::test]
    async fn session_lifecycle_is_explicit() {
        let (http, _rx) = create_mock_http(4);
        let mut system = WarehouseSystem::with_transport(http, Config::default(), Vec::new());
        assert!(system.session().is_none());

        let session = system.sign_in("morgan", Role::Manager);
        assert!(session.has(Permission::InventoryEdit));
        assert_eq!(system.session().map(|s| s.role), Some(Role::Manager));

        let ended = system.sign_out();
        assert_eq!(ended.map(|s| s.user), Some("morgan".to_string()));
        assert!(system.session().is_none());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn start_and_shutdown_with_real_transport() {
        let config = Config::default().with_base_url("http://127.0.0.1:9");
        let system = WarehouseSystem::start(config).unwrap();
        assert_eq!(system.config().api_base_url, "http://127.0.0.1:9");
        system.shutdown().await.unwrap();
    }
}
