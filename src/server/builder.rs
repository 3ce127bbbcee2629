//! ServerBuilder for fluent API to build the portal HTTP server

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::PortalConfig;
use crate::core::query::{MAX_LIMIT, SortSpec};
use crate::core::service::{DonationService, EventService};
use crate::storage::{InMemoryDonationService, InMemoryEventService, Roster};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the portal server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_roster(Roster::from_file("alumni.yaml")?)
///     .with_config(&PortalConfig::default_config())?
///     .build()?;
/// ```
pub struct ServerBuilder {
    roster: Option<Roster>,
    events: Option<Arc<dyn EventService>>,
    donations: Option<Arc<dyn DonationService>>,
    default_sort: SortSpec,
    max_page_size: usize,
    cors: bool,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            roster: None,
            events: None,
            donations: None,
            default_sort: SortSpec::default(),
            max_page_size: MAX_LIMIT,
            cors: false,
            custom_routes: Vec::new(),
        }
    }

    /// Set the alumni roster (required)
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Set the events service; defaults to an empty in-memory one
    pub fn with_event_service(mut self, service: impl EventService + 'static) -> Self {
        self.events = Some(Arc::new(service));
        self
    }

    /// Set the donation service; defaults to the configured campaigns in memory
    pub fn with_donation_service(mut self, service: impl DonationService + 'static) -> Self {
        self.donations = Some(Arc::new(service));
        self
    }

    /// Apply directory, donation and server settings from a configuration
    ///
    /// Installs an in-memory donation ledger seeded with the configured
    /// campaigns unless one was already set.
    pub fn with_config(mut self, config: &PortalConfig) -> Result<Self> {
        self.default_sort = config.directory.default_sort()?;
        self.max_page_size = config.directory.max_page_size;
        self.cors = config.server.cors;

        if self.donations.is_none() {
            let ledger = InMemoryDonationService::new(config.donations.campaigns.clone())
                .with_max_pledge(config.donations.max_pledge);
            self.donations = Some(Arc::new(ledger));
        }

        Ok(self)
    }

    /// Sort used when a directory request does not name one
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    /// Allow cross-origin requests from any origin
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let extra = Router::new().route("/about", get(about));
    ///
    /// ServerBuilder::new()
    ///     .with_roster(roster)
    ///     .with_custom_routes(extra)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let roster = self
            .roster
            .take()
            .ok_or_else(|| anyhow::anyhow!("Roster is required. Call .with_roster()"))?;
        if roster.is_empty() {
            tracing::warn!("Serving an empty roster; every directory query will be empty");
        }

        let events = self
            .events
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryEventService::new()));

        let donations = self
            .donations
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryDonationService::new(Vec::new())));

        tracing::debug!(
            alumni = roster.len(),
            default_sort = %self.default_sort,
            max_page_size = self.max_page_size,
            "Server host built"
        );

        Ok(ServerHost {
            roster,
            events,
            donations,
            default_sort: self.default_sort,
            max_page_size: self.max_page_size,
        })
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes, self.cors)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM
///
/// A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
