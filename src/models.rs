pub mod agenda;
pub mod barbearia;
pub mod cliente;
pub mod servico;
