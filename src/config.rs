// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AnnouncementRepository, ComponentRepository, DashboardRepository, OrderRepository,
        UserRepository,
    },
    services::{
        announcement_service::AnnouncementService, auth::AuthService, cep_service::CepService,
        component_service::ComponentService, customer_service::CustomerService,
        dashboard_service::DashboardService, order_service::OrderService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub component_service: ComponentService,
    pub order_service: OrderService,
    pub announcement_service: AnnouncementService,
    pub dashboard_service: DashboardService,
    pub cep_service: CepService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        // Substituível em testes/homologação; produção usa o ViaCEP real.
        let viacep_base_url = env::var("VIACEP_BASE_URL").ok();

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new();
        let component_repo = ComponentRepository::new();
        let order_repo = OrderRepository::new();
        let announcement_repo = AnnouncementRepository::new();
        let dashboard_repo = DashboardRepository::new();

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let customer_service = CustomerService::new(user_repo.clone());
        let component_service = ComponentService::new(component_repo.clone());
        let order_service = OrderService::new(order_repo, component_repo, user_repo);
        let announcement_service = AnnouncementService::new(announcement_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);
        let cep_service = CepService::new(viacep_base_url)?;

        Ok(Self {
            db_pool,
            auth_service,
            customer_service,
            component_service,
            order_service,
            announcement_service,
            dashboard_service,
            cep_service,
        })
    }
}
