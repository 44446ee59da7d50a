// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users / Clientes ---
        handlers::users::list_customers,
        handlers::users::update_profile,

        // --- Components ---
        handlers::components::list_components,
        handlers::components::create_component,
        handlers::components::update_component,
        handlers::components::delete_component,

        // --- Orders (OS) ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order_item,

        // --- Announcements ---
        handlers::announcements::list_announcements,
        handlers::announcements::create_announcement,
        handlers::announcements::update_announcement,
        handlers::announcements::delete_announcement,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- CEP ---
        handlers::cep::lookup_cep,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserType,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::UpdateProfilePayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Components ---
            models::component::Component,
            models::component::ComponentPayload,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::ApplianceType,
            models::order::Voltage,
            models::order::Order,
            models::order::OrderAppliance,
            models::order::OrderPart,
            models::order::ApplianceItem,
            models::order::PartItem,
            models::order::ApplianceDraft,
            models::order::PartDraft,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderPayload,
            models::order::OrderDetail,

            // --- Announcements ---
            models::announcement::AnnouncementType,
            models::announcement::Announcement,
            models::announcement::AnnouncementPayload,
            models::announcement::AnnouncementPage,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::StatusCountEntry,

            // --- CEP ---
            services::cep_service::CepLookupResult,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Cadastro"),
        (name = "Users", description = "Gestão de Clientes"),
        (name = "Components", description = "Catálogo de Peças e Estoque"),
        (name = "Orders", description = "Ordens de Serviço (OS)"),
        (name = "Announcements", description = "Mural de Avisos"),
        (name = "Dashboard", description = "Indicadores Gerenciais"),
        (name = "Cep", description = "Consulta de CEP (ViaCEP)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_jwt", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}
