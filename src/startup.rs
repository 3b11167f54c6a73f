//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    AuthService, AuthServiceImpl, CertificateService, CertificateServiceImpl, TagService,
    TagServiceImpl, UserOrderService, UserOrderServiceImpl, UserService, UserServiceImpl,
};
use crate::config::Settings;
use crate::domain::{CertificateRepository, OrderRepository, TagRepository, UserRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    PgCertificateRepository, PgOrderRepository, PgTagRepository, PgUserRepository,
};
use crate::presentation::http::handlers::health;
use crate::presentation::http::hateoas::LinkBuilder;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tag_service: Arc<dyn TagService>,
    pub certificate_service: Arc<dyn CertificateService>,
    pub order_service: Arc<dyn UserOrderService>,
    pub user_service: Arc<dyn UserService>,
    pub auth_service: Arc<dyn AuthService>,
    pub links: LinkBuilder,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the services over PostgreSQL repositories.
    pub fn new(db: PgPool, settings: Settings) -> Self {
        Self::with_repositories(
            db.clone(),
            Arc::new(PgTagRepository::new(db.clone())),
            Arc::new(PgCertificateRepository::new(db.clone())),
            Arc::new(PgUserRepository::new(db.clone())),
            Arc::new(PgOrderRepository::new(db)),
            settings,
        )
    }

    /// Wire the services over any repository implementations.
    pub fn with_repositories<T, C, U, O>(
        db: PgPool,
        tag_repo: Arc<T>,
        certificate_repo: Arc<C>,
        user_repo: Arc<U>,
        order_repo: Arc<O>,
        settings: Settings,
    ) -> Self
    where
        T: TagRepository + 'static,
        C: CertificateRepository + 'static,
        U: UserRepository + 'static,
        O: OrderRepository + 'static,
    {
        let tag_service = Arc::new(TagServiceImpl::new(
            tag_repo.clone(),
            certificate_repo.clone(),
        ));
        let certificate_service = Arc::new(CertificateServiceImpl::new(
            certificate_repo.clone(),
            tag_repo,
        ));
        let order_service = Arc::new(UserOrderServiceImpl::new(
            order_repo,
            user_repo.clone(),
            certificate_repo,
        ));
        let user_service = Arc::new(UserServiceImpl::new(user_repo.clone()));
        let auth_service = Arc::new(AuthServiceImpl::new(user_repo, settings.jwt.clone()));

        Self {
            db,
            tag_service,
            certificate_service,
            order_service,
            user_service,
            auth_service,
            links: LinkBuilder::new(&settings.links.base_url),
            settings: Arc::new(settings),
        }
    }
}

/// Build the router with all global layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let state = AppState::new(db, settings.clone());

        if let Some(admin) = &settings.admin {
            let user = state
                .auth_service
                .ensure_admin(&admin.name, &admin.password)
                .await
                .context("Failed to bootstrap administrator account")?;
            tracing::info!(user_id = user.id, name = %user.name, "Administrator account ready");
        }

        let router = build_router(state);

        // Bind to address
        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
