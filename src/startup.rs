//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio_cron_scheduler::JobScheduler;

use crate::application::services::{
    CampaignService, CampaignServiceImpl, CustomerService, CustomerServiceImpl,
    LoggedReportService, NotificationService, NotificationServiceImpl, ReportService,
    ReportServiceImpl, SalesService, SalesServiceImpl, ScheduleService, ScheduleServiceImpl,
    SupportService, SupportServiceImpl, UserService, UserServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::infrastructure::clients::{
    build_http_client, CustomerClient, HttpCustomerClient, HttpNotificationClient,
    NotificationClient, ServiceClient, ServiceRegistry, CUSTOMER_SERVICE, NOTIFICATION_SERVICE,
};
use crate::infrastructure::repositories::Repositories;
use crate::infrastructure::{database, scheduler};
use crate::presentation::http::{create_router, handlers::health};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub customers: Arc<dyn CustomerService>,
    pub campaigns: Arc<dyn CampaignService>,
    pub notifications: Arc<dyn NotificationService>,
    pub sales: Arc<dyn SalesService>,
    pub support: Arc<dyn SupportService>,
    pub schedules: Arc<dyn ScheduleService>,
    pub reports: Arc<dyn ReportService>,
    pub registry: Arc<ServiceRegistry>,
    pub http_client: reqwest::Client,
    /// Present for the postgres backend only
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire every service over `repositories`, with HTTP clients resolved
    /// through the registry built from `settings`.
    pub fn new(
        settings: Settings,
        repositories: Repositories,
        db: Option<PgPool>,
    ) -> Result<Self, AppError> {
        let http_client =
            build_http_client(Duration::from_secs(settings.services.request_timeout_secs))?;
        let registry = Arc::new(ServiceRegistry::from_settings(&settings));

        let customer_client: Arc<dyn CustomerClient> = Arc::new(HttpCustomerClient::new(
            ServiceClient::new(http_client.clone(), registry.clone(), CUSTOMER_SERVICE),
        ));
        let notification_client: Arc<dyn NotificationClient> =
            Arc::new(HttpNotificationClient::new(ServiceClient::new(
                http_client.clone(),
                registry.clone(),
                NOTIFICATION_SERVICE,
            )));

        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id as u64,
            settings.snowflake.epoch,
        ));

        let Repositories {
            users,
            customers,
            campaigns,
            notifications,
            opportunities,
            tickets,
            schedules,
        } = repositories;

        let reports = LoggedReportService::new(ReportServiceImpl::new(
            opportunities.clone(),
            notifications.clone(),
            tickets.clone(),
            campaigns.clone(),
        ));

        Ok(Self {
            users: Arc::new(UserServiceImpl::new(users, snowflake.clone())),
            customers: Arc::new(CustomerServiceImpl::new(customers, snowflake.clone())),
            campaigns: Arc::new(CampaignServiceImpl::new(campaigns, snowflake.clone())),
            notifications: Arc::new(NotificationServiceImpl::new(
                notifications,
                customer_client.clone(),
                snowflake.clone(),
            )),
            sales: Arc::new(SalesServiceImpl::new(
                opportunities,
                customer_client.clone(),
                notification_client,
                snowflake.clone(),
            )),
            support: Arc::new(SupportServiceImpl::new(
                tickets,
                customer_client,
                snowflake.clone(),
            )),
            schedules: Arc::new(ScheduleServiceImpl::new(schedules, snowflake)),
            reports: Arc::new(reports),
            registry,
            http_client,
            db,
            settings: Arc::new(settings),
        })
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    scheduler: Option<JobScheduler>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(mut settings: Settings) -> Result<Self> {
        // Bind first so port 0 resolves before the registry is built.
        let listener = TcpListener::bind(settings.server_addr()).await?;
        let addr = listener.local_addr()?;
        settings.server.port = addr.port();
        tracing::info!("Listening on {}", addr);

        let (repositories, db) = match settings.database.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }
                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory repositories; data is lost on shutdown");
                (Repositories::in_memory(), None)
            }
        };

        let scheduler_enabled = settings.scheduler.enabled;
        let state = AppState::new(settings, repositories, db)?;

        let scheduler = if scheduler_enabled {
            Some(
                scheduler::start_scheduler(
                    state.schedules.clone(),
                    state.sales.clone(),
                    state.notifications.clone(),
                )
                .await?,
            )
        } else {
            tracing::info!("Task scheduler disabled");
            None
        };

        health::init_server_start();
        let router = create_router(state);

        Ok(Self {
            listener,
            router,
            scheduler,
        })
    }

    /// Run the server until Ctrl-C
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(mut scheduler) = self.scheduler {
            scheduler.shutdown().await?;
            tracing::info!("Task scheduler stopped");
        }
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
