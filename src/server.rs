//! Reusable customer service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! store selection, database init, migrations, REST API and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::CustomerService;
use crate::config::{AppConfig, DatabaseBackend};
use crate::domain::CustomerRepository;
use crate::infrastructure::database::migrator::Migrator;
use crate::shared::errors::AppError;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{
    create_api_router, init_database, DatabaseConfig, InMemoryCustomerRepository,
    SeaOrmCustomerRepository,
};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the customer service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running customer service.
///
/// # Examples
///
/// ```rust,no_run
/// use customer_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Customer use cases backed by the configured store.
    pub customer_service: Arc<CustomerService<dyn CustomerRepository>>,
    /// The configuration the server was started with.
    pub config: AppConfig,

    local_addr: SocketAddr,
    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the customer service with the given options.
    ///
    /// This will:
    /// 1. Open the configured store (database or in-memory)
    /// 2. Run migrations when enabled and a database is used
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;

        info!("Starting customer service...");

        // ── Store ──────────────────────────────────────────────
        let (repo, db): (Arc<dyn CustomerRepository>, Option<DatabaseConnection>) =
            match app_cfg.database.backend {
                DatabaseBackend::Memory => {
                    warn!("Using in-memory customer store, data is lost on shutdown");
                    (Arc::new(InMemoryCustomerRepository::new()), None)
                }
                DatabaseBackend::Sqlite | DatabaseBackend::Postgres => {
                    let db_config = DatabaseConfig::from(&app_cfg.database);
                    let db = init_database(&db_config).await?;

                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        Migrator::up(&db, None).await?;
                        info!("Migrations completed");
                    }

                    (Arc::new(SeaOrmCustomerRepository::new(db.clone())), Some(db))
                }
            };

        let customer_service = Arc::new(CustomerService::new(repo));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(customer_service.clone(), db.clone());

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            customer_service,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Address the REST API is bound to. Useful when the configured port is 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    ///
    /// Draining in-flight requests and closing the database are bounded by
    /// `server.shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;

        shutdown.signal().wait().await;
        info!("Waiting for server tasks to complete...");

        let completed = shutdown
            .run_cleanup(|| async {
                match (&mut api_task).await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }

                if let Some(db) = db {
                    match db.close().await {
                        Ok(()) => info!("Database connection closed"),
                        Err(e) => warn!("Error closing database connection: {}", e),
                    }
                }
            })
            .await;

        if !completed {
            api_task.abort();
        }

        info!("Customer service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down customer service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
