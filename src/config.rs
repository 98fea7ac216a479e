// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AgendaRepository, BarbeariaRepository, ClienteRepository, MemoryStore,
        PgAgendaRepository, PgBarbeariaRepository, PgClienteRepository, PgServicoRepository,
        ServicoRepository,
    },
    services::{AgendaService, BarbeariaService, ClienteService, ServicoService},
};

const SERVER_ADDR_PADRAO: &str = "0.0.0.0:3000";
const MAX_CONNECTIONS_PADRAO: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub max_connections: u32,
}

impl Config {
    /// Lê do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| SERVER_ADDR_PADRAO.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(valor) => valor
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {valor}"))?,
            None => MAX_CONNECTIONS_PADRAO,
        };

        Ok(Self { database_url, server_addr, max_connections })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let db_pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(db_pool)
    }
}

// O estado compartilhado pelos handlers: um serviço por entidade.
#[derive(Clone)]
pub struct AppState {
    pub barbearia_service: BarbeariaService,
    pub cliente_service: ClienteService,
    pub servico_service: ServicoService,
    pub agenda_service: AgendaService,
}

impl AppState {
    /// Estado de produção, sobre o Postgres.
    pub fn new(db_pool: PgPool) -> Self {
        Self::from_repositories(
            Arc::new(PgBarbeariaRepository::new(db_pool.clone())),
            Arc::new(PgClienteRepository::new(db_pool.clone())),
            Arc::new(PgServicoRepository::new(db_pool.clone())),
            Arc::new(PgAgendaRepository::new(db_pool)),
        )
    }

    /// Estado sem banco, tudo em memória (testes).
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::from_repositories(store.clone(), store.clone(), store.clone(), store)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_repositories(
        barbearias: Arc<dyn BarbeariaRepository>,
        clientes: Arc<dyn ClienteRepository>,
        servicos: Arc<dyn ServicoRepository>,
        agendas: Arc<dyn AgendaRepository>,
    ) -> Self {
        Self {
            barbearia_service: BarbeariaService::new(barbearias.clone()),
            cliente_service: ClienteService::new(clientes.clone(), barbearias.clone()),
            servico_service: ServicoService::new(servicos, barbearias.clone()),
            agenda_service: AgendaService::new(agendas, barbearias, clientes),
        }
    }
}
