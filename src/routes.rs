// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

// Rotas fixas (/cnpj, /email, /cpf, /periodo) convivem com /{id}:
// o axum sempre prefere o segmento literal.
pub fn build_router(app_state: AppState) -> Router {
    let barbearia_routes = Router::new()
        .route("/api/barbearias"
               ,get(handlers::barbearias::list_barbearias)
               .post(handlers::barbearias::create_barbearia)
        )
        .route("/api/barbearias/cnpj", get(handlers::barbearias::get_barbearia_by_cnpj))
        .route("/api/barbearias/email", get(handlers::barbearias::get_barbearia_by_email))
        .route("/api/barbearias/{id}"
               ,get(handlers::barbearias::get_barbearia)
               .put(handlers::barbearias::update_barbearia)
               .delete(handlers::barbearias::delete_barbearia)
        );

    let cliente_routes = Router::new()
        .route("/api/clientes"
               ,get(handlers::clientes::list_clientes)
               .post(handlers::clientes::create_cliente)
        )
        .route("/api/clientes/cpf", get(handlers::clientes::get_cliente_by_cpf))
        .route("/api/clientes/email", get(handlers::clientes::get_cliente_by_email))
        .route("/api/clientes/barbearia/{barbeariaId}"
               ,get(handlers::clientes::list_clientes_by_barbearia)
               .post(handlers::clientes::create_cliente_with_barbearia)
        )
        .route("/api/clientes/{id}"
               ,get(handlers::clientes::get_cliente)
               .put(handlers::clientes::update_cliente)
               .delete(handlers::clientes::delete_cliente)
        );

    let servico_routes = Router::new()
        .route("/api/servicos"
               ,get(handlers::servicos::list_servicos)
               .post(handlers::servicos::create_servico)
        )
        .route("/api/servicos/barbearia/{barbeariaId}"
               ,get(handlers::servicos::list_servicos_by_barbearia)
               .post(handlers::servicos::create_servico_with_barbearia)
        )
        .route("/api/servicos/{id}"
               ,get(handlers::servicos::get_servico)
               .put(handlers::servicos::update_servico)
               .delete(handlers::servicos::delete_servico)
        );

    let agenda_routes = Router::new()
        .route("/api/agendas"
               ,get(handlers::agendas::list_agendas)
               .post(handlers::agendas::create_agenda)
        )
        .route("/api/agendas/periodo", get(handlers::agendas::list_agendas_by_periodo))
        .route("/api/agendas/cliente/{clienteId}", get(handlers::agendas::list_agendas_by_cliente))
        .route("/api/agendas/barbearia/{barbeariaId}"
               ,get(handlers::agendas::list_agendas_by_barbearia)
               .post(handlers::agendas::create_agenda_with_barbearia)
        )
        .route("/api/agendas/barbearia/{barbeariaId}/cliente/{clienteId}"
               ,post(handlers::agendas::create_agenda_with_barbearia_and_cliente)
        )
        .route("/api/agendas/{id}"
               ,get(handlers::agendas::get_agenda)
               .put(handlers::agendas::update_agenda)
               .delete(handlers::agendas::delete_agenda)
        );

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(barbearia_routes)
        .merge(cliente_routes)
        .merge(servico_routes)
        .merge(agenda_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
