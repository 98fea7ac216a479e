pub mod agendas;
pub mod barbearias;
pub mod clientes;
pub mod servicos;
