// src/db/memory_repo.rs

//! Armazenamento em memória com as mesmas regras do schema Postgres:
//! ids sequenciais por tabela, UNIQUE em cnpj/cpf, FKs para barbearias,
//! cascata ao apagar barbearia e `SET NULL` em agendas ao apagar cliente.
//! Usado pelos testes, que assim rodam sem banco.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::{AgendaRepository, BarbeariaRepository, ClienteRepository, ServicoRepository},
    models::{agenda::Agenda, barbearia::Barbearia, cliente::Cliente, servico::Servico},
};

struct Tabela<T> {
    linhas: BTreeMap<i64, T>,
    ultimo_id: i64,
}

impl<T> Default for Tabela<T> {
    fn default() -> Self {
        Self { linhas: BTreeMap::new(), ultimo_id: 0 }
    }
}

impl<T: Clone> Tabela<T> {
    fn proximo_id(&mut self) -> i64 {
        self.ultimo_id += 1;
        self.ultimo_id
    }

    /// id do INSERT (novo) ou do UPDATE (precisa existir).
    fn resolver_id(&mut self, id: Option<i64>, recurso: &str) -> Result<i64, AppError> {
        match id {
            None => Ok(self.proximo_id()),
            Some(id) if self.linhas.contains_key(&id) => Ok(id),
            Some(id) => Err(AppError::not_found(recurso, id)),
        }
    }

    fn filtrar(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.linhas.values().filter(|l| pred(l)).cloned().collect()
    }
}

#[derive(Default)]
struct Tabelas {
    barbearias: Tabela<Barbearia>,
    clientes: Tabela<Cliente>,
    servicos: Tabela<Servico>,
    agendas: Tabela<Agenda>,
}

impl Tabelas {
    // Equivalente à FK: o serviço já garante, aqui só não deixamos passar.
    fn checar_barbearia(&self, barbearia_id: Option<i64>) -> Result<(), AppError> {
        match barbearia_id {
            Some(id) if !self.barbearias.linhas.contains_key(&id) => Err(AppError::BarbeariaNotFound(id)),
            _ => Ok(()),
        }
    }

    fn desvincular_cliente_das_agendas(&mut self, clientes: &HashSet<i64>) {
        for agenda in self.agendas.linhas.values_mut() {
            if agenda.cliente_id.is_some_and(|c| clientes.contains(&c)) {
                agenda.cliente_id = None;
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tabelas: RwLock<Tabelas>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// =========================================================================
//  BARBEARIAS
// =========================================================================

#[async_trait]
impl BarbeariaRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Barbearia>, AppError> {
        Ok(self.tabelas.read().await.barbearias.filtrar(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Barbearia>, AppError> {
        Ok(self.tabelas.read().await.barbearias.linhas.get(&id).cloned())
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Barbearia>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.barbearias.linhas.values().find(|b| b.cnpj.as_deref() == Some(cnpj)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Barbearia>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.barbearias.linhas.values().find(|b| b.email.as_deref() == Some(email)).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tabelas.read().await.barbearias.linhas.contains_key(&id))
    }

    async fn save(&self, mut barbearia: Barbearia) -> Result<Barbearia, AppError> {
        let mut t = self.tabelas.write().await;

        if let Some(cnpj) = barbearia.cnpj_preenchido() {
            let colide = t.barbearias.linhas.values()
                .any(|b| b.id != barbearia.id && b.cnpj.as_deref() == Some(cnpj));
            if colide {
                return Err(AppError::DuplicateTaxId("CNPJ"));
            }
        }

        let id = t.barbearias.resolver_id(barbearia.id, "Barbearia não encontrada")?;
        barbearia.id = Some(id);
        t.barbearias.linhas.insert(id, barbearia.clone());
        Ok(barbearia)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tabelas.write().await;
        if t.barbearias.linhas.remove(&id).is_none() {
            return Ok(());
        }

        let do_pai = Some(id);
        let clientes_removidos: HashSet<i64> = t.clientes.linhas.iter()
            .filter(|(_, c)| c.barbearia_id == do_pai)
            .map(|(cid, _)| *cid)
            .collect();

        t.clientes.linhas.retain(|_, c| c.barbearia_id != do_pai);
        t.servicos.linhas.retain(|_, s| s.barbearia_id() != do_pai);
        t.agendas.linhas.retain(|_, a| a.barbearia_id != do_pai);
        t.desvincular_cliente_das_agendas(&clientes_removidos);
        Ok(())
    }
}

// =========================================================================
//  CLIENTES
// =========================================================================

#[async_trait]
impl ClienteRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Cliente>, AppError> {
        Ok(self.tabelas.read().await.clientes.filtrar(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError> {
        Ok(self.tabelas.read().await.clientes.linhas.get(&id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Cliente>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.clientes.linhas.values().find(|c| c.cpf.as_deref() == Some(cpf)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.clientes.linhas.values().find(|c| c.email.as_deref() == Some(email)).cloned())
    }

    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Cliente>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.clientes.filtrar(|c| c.barbearia_id == Some(barbearia_id)))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tabelas.read().await.clientes.linhas.contains_key(&id))
    }

    async fn save(&self, mut cliente: Cliente) -> Result<Cliente, AppError> {
        let mut t = self.tabelas.write().await;

        if let Some(cpf) = cliente.cpf_preenchido() {
            let colide = t.clientes.linhas.values()
                .any(|c| c.id != cliente.id && c.cpf.as_deref() == Some(cpf));
            if colide {
                return Err(AppError::DuplicateTaxId("CPF"));
            }
        }
        t.checar_barbearia(cliente.barbearia_id)?;

        let id = t.clientes.resolver_id(cliente.id, "Cliente não encontrado")?;
        cliente.id = Some(id);
        t.clientes.linhas.insert(id, cliente.clone());
        Ok(cliente)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tabelas.write().await;
        if t.clientes.linhas.remove(&id).is_some() {
            t.desvincular_cliente_das_agendas(&HashSet::from([id]));
        }
        Ok(())
    }
}

// =========================================================================
//  SERVIÇOS
// =========================================================================

#[async_trait]
impl ServicoRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Servico>, AppError> {
        Ok(self.tabelas.read().await.servicos.filtrar(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Servico>, AppError> {
        Ok(self.tabelas.read().await.servicos.linhas.get(&id).cloned())
    }

    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Servico>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.servicos.filtrar(|s| s.barbearia_id() == Some(barbearia_id)))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tabelas.read().await.servicos.linhas.contains_key(&id))
    }

    async fn save(&self, mut servico: Servico) -> Result<Servico, AppError> {
        let mut t = self.tabelas.write().await;
        t.checar_barbearia(servico.barbearia_id())?;

        let id = t.servicos.resolver_id(servico.id(), "Serviço não encontrado")?;
        servico.set_id(id);
        t.servicos.linhas.insert(id, servico.clone());
        Ok(servico)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.tabelas.write().await.servicos.linhas.remove(&id);
        Ok(())
    }
}

// =========================================================================
//  AGENDAS
// =========================================================================

#[async_trait]
impl AgendaRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Agenda>, AppError> {
        Ok(self.tabelas.read().await.agendas.filtrar(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Agenda>, AppError> {
        Ok(self.tabelas.read().await.agendas.linhas.get(&id).cloned())
    }

    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Agenda>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.agendas.filtrar(|a| a.barbearia_id == Some(barbearia_id)))
    }

    async fn find_by_cliente_id(&self, cliente_id: i64) -> Result<Vec<Agenda>, AppError> {
        let t = self.tabelas.read().await;
        Ok(t.agendas.filtrar(|a| a.cliente_id == Some(cliente_id)))
    }

    async fn find_by_data_between(
        &self,
        inicio: NaiveDateTime,
        fim: NaiveDateTime,
    ) -> Result<Vec<Agenda>, AppError> {
        let t = self.tabelas.read().await;
        let mut agendas = t.agendas.filtrar(|a| inicio <= a.data && a.data <= fim);
        agendas.sort_by_key(|a| (a.data, a.id));
        Ok(agendas)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tabelas.read().await.agendas.linhas.contains_key(&id))
    }

    async fn save(&self, mut agenda: Agenda) -> Result<Agenda, AppError> {
        let mut t = self.tabelas.write().await;
        t.checar_barbearia(agenda.barbearia_id)?;
        if let Some(cliente_id) = agenda.cliente_id {
            if !t.clientes.linhas.contains_key(&cliente_id) {
                return Err(AppError::not_found("Cliente não encontrado", cliente_id));
            }
        }

        let id = t.agendas.resolver_id(agenda.id, "Agenda não encontrada")?;
        agenda.id = Some(id);
        t.agendas.linhas.insert(id, agenda.clone());
        Ok(agenda)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.tabelas.write().await.agendas.linhas.remove(&id);
        Ok(())
    }
}
