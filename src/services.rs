pub mod agenda_service;
pub use agenda_service::AgendaService;
pub mod barbearia_service;
pub use barbearia_service::BarbeariaService;
pub mod cliente_service;
pub use cliente_service::ClienteService;
pub mod servico_service;
pub use servico_service::ServicoService;
