use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use url::Url;

use crate::api::rest::routes;
use crate::config::AppointmentsConfig;
use crate::contract::client::AppointmentsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::AppointmentsLocalClient;
use crate::infra::catalog::SeaOrmServiceCatalog;
use crate::infra::events::LogEventPublisher;
use crate::infra::messaging::HttpConfirmationSender;
use crate::infra::personnel::SeaOrmPersonnelDirectory;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmAppointmentsRepository;
use crate::domain::ports::SystemClock;

/// The assembled scheduling module: repository, collaborator adapters and
/// domain service wired together over one database connection.
pub struct Appointments {
    service: Arc<Service>,
}

impl Appointments {
    /// Apply this module's migrations.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running appointments database migrations");
        Migrator::up(db, None).await?;
        info!("Appointments database migrations completed");
        Ok(())
    }

    /// Wire repository (infra) and collaborator adapters to the domain
    /// service (ports).
    pub fn init(db: DatabaseConnection, cfg: &AppointmentsConfig) -> anyhow::Result<Self> {
        info!("Initializing appointments module");

        let notify_base = Url::parse(&cfg.notifications_base_url)
            .context("appointments.notifications_base_url is not a valid URL")?;

        let repo = Arc::new(SeaOrmAppointmentsRepository::new(db.clone()));
        let personnel = Arc::new(SeaOrmPersonnelDirectory::new(
            db.clone(),
            cfg.default_working_hours.clone(),
        ));
        let catalog = Arc::new(SeaOrmServiceCatalog::new(db));
        let confirmations = Arc::new(HttpConfirmationSender::new(
            reqwest::Client::new(),
            notify_base,
        ));

        let service = Service::new(
            repo,
            personnel,
            catalog,
            confirmations,
            Arc::new(LogEventPublisher),
            Arc::new(SystemClock),
            ServiceConfig {
                default_slot_minutes: cfg.default_slot_minutes,
                min_cancel_lead_hours: cfg.min_cancel_lead_hours,
            },
        );

        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// REST routes of this module, ready to merge into the server router.
    pub fn rest_router(&self) -> axum::Router {
        routes::router(self.service())
    }

    /// Local in-process client implementing the public contract.
    pub fn client(&self) -> Arc<dyn AppointmentsApi> {
        Arc::new(AppointmentsLocalClient::new(self.service()))
    }

    /// This module's OpenAPI document.
    pub fn openapi() -> utoipa::openapi::OpenApi {
        routes::openapi()
    }
}
