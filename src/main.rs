//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod domain;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Cadastro e login são abertos; /me e edição de perfil exigem token.
    let user_routes = Router::new()
        .route("/", post(handlers::auth::register))
        .route("/auth", post(handlers::auth::login))
        .route("/customers", get(handlers::users::list_customers))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .route("/{id}", put(handlers::users::update_profile))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    // Catálogo de peças: consulta aberta, escrita protegida.
    let component_routes = Router::new()
        .route("/", get(handlers::components::list_components))
        .merge(
            Router::new()
                .route("/", post(handlers::components::create_component))
                .route(
                    "/{id}",
                    put(handlers::components::update_component)
                        .delete(handlers::components::delete_component),
                )
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    // Ordens de serviço: leitura aberta (o cliente acompanha a OS),
    // criação e edição restritas à equipe.
    let order_routes = Router::new()
        .route("/", get(handlers::orders::list_orders))
        .route("/{id}", get(handlers::orders::get_order))
        .merge(
            Router::new()
                .route("/", post(handlers::orders::create_order))
                .route("/{id}", patch(handlers::orders::update_order))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    let announcement_routes = Router::new()
        .route("/", get(handlers::announcements::list_announcements))
        .merge(
            Router::new()
                .route("/", post(handlers::announcements::create_announcement))
                .route(
                    "/{id}",
                    put(handlers::announcements::update_announcement)
                        .delete(handlers::announcements::delete_announcement),
                )
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/cep/{cep}", get(handlers::cep::lookup_cep))
        .route(
            "/order-items/{id}",
            delete(handlers::orders::delete_order_item).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
            ),
        )
        .nest("/users", user_routes)
        .nest("/components", component_routes)
        .nest("/orders", order_routes)
        .nest("/announcements", announcement_routes)
        .nest("/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
