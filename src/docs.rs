// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Barbearias ---
        handlers::barbearias::list_barbearias,
        handlers::barbearias::get_barbearia,
        handlers::barbearias::get_barbearia_by_cnpj,
        handlers::barbearias::get_barbearia_by_email,
        handlers::barbearias::create_barbearia,
        handlers::barbearias::update_barbearia,
        handlers::barbearias::delete_barbearia,

        // --- Clientes ---
        handlers::clientes::list_clientes,
        handlers::clientes::list_clientes_by_barbearia,
        handlers::clientes::get_cliente,
        handlers::clientes::get_cliente_by_cpf,
        handlers::clientes::get_cliente_by_email,
        handlers::clientes::create_cliente,
        handlers::clientes::create_cliente_with_barbearia,
        handlers::clientes::update_cliente,
        handlers::clientes::delete_cliente,

        // --- Serviços ---
        handlers::servicos::list_servicos,
        handlers::servicos::list_servicos_by_barbearia,
        handlers::servicos::get_servico,
        handlers::servicos::create_servico,
        handlers::servicos::create_servico_with_barbearia,
        handlers::servicos::update_servico,
        handlers::servicos::delete_servico,

        // --- Agendas ---
        handlers::agendas::list_agendas,
        handlers::agendas::list_agendas_by_barbearia,
        handlers::agendas::list_agendas_by_cliente,
        handlers::agendas::list_agendas_by_periodo,
        handlers::agendas::get_agenda,
        handlers::agendas::create_agenda,
        handlers::agendas::create_agenda_with_barbearia,
        handlers::agendas::create_agenda_with_barbearia_and_cliente,
        handlers::agendas::update_agenda,
        handlers::agendas::delete_agenda,
    ),
    components(
        schemas(
            models::barbearia::Barbearia,
            models::barbearia::BarbeariaPayload,

            models::cliente::Cliente,
            models::cliente::ClientePayload,

            models::servico::Servico,
            models::servico::ServicoPayload,

            models::agenda::Agenda,
            models::agenda::AgendaPayload,
        )
    ),
    tags(
        (name = "Barbearias", description = "Cadastro de barbearias"),
        (name = "Clientes", description = "Clientes, com ou sem barbearia"),
        (name = "Serviços", description = "Serviços oferecidos, valores e equipe"),
        (name = "Agendas", description = "Horários marcados")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documento_tem_as_rotas_principais() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/barbearias/{id}",
            "/api/clientes/barbearia/{barbeariaId}",
            "/api/servicos",
            "/api/agendas/periodo",
            "/api/agendas/barbearia/{barbeariaId}/cliente/{clienteId}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltou {path}");
        }
    }
}
