pub mod barbearia_repo;
pub use barbearia_repo::{BarbeariaRepository, PgBarbeariaRepository};
pub mod cliente_repo;
pub use cliente_repo::{ClienteRepository, PgClienteRepository};
pub mod servico_repo;
pub use servico_repo::{PgServicoRepository, ServicoRepository};
pub mod agenda_repo;
pub use agenda_repo::{AgendaRepository, PgAgendaRepository};
pub mod memory_repo;
pub use memory_repo::MemoryStore;

use crate::common::error::AppError;

/// O que uma gravação referencia, para traduzir violações de constraint
/// nos mesmos erros que as checagens do serviço dariam.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Referencias {
    /// "CNPJ" ou "CPF", quando a tabela tem documento UNIQUE
    pub documento: Option<&'static str>,
    pub barbearia_id: Option<i64>,
    pub cliente_id: Option<i64>,
}

// Cobre as corridas entre a checagem do serviço e o INSERT/UPDATE:
// dois documentos iguais ao mesmo tempo, ou a barbearia/cliente apagados no meio.
pub(crate) fn map_constraint_violation(e: sqlx::Error, refs: Referencias) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(documento) = refs.documento {
                return AppError::DuplicateTaxId(documento);
            }
        }
        if db_err.is_foreign_key_violation() {
            let na_fk_de_cliente = db_err.constraint().is_some_and(|c| c.ends_with("cliente_id_fkey"));
            match (na_fk_de_cliente, refs.cliente_id, refs.barbearia_id) {
                (true, Some(id), _) => return AppError::not_found("Cliente não encontrado", id),
                (false, _, Some(id)) => return AppError::BarbeariaNotFound(id),
                _ => {}
            }
        }
    }
    e.into()
}
