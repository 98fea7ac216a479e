// src/services/servico_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{BarbeariaRepository, ServicoRepository},
    models::servico::{Servico, ServicoPayload},
};

#[derive(Clone)]
pub struct ServicoService {
    repo: Arc<dyn ServicoRepository>,
    barbearia_repo: Arc<dyn BarbeariaRepository>,
}

impl ServicoService {
    pub fn new(
        repo: Arc<dyn ServicoRepository>,
        barbearia_repo: Arc<dyn BarbeariaRepository>,
    ) -> Self {
        Self { repo, barbearia_repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Servico>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Servico>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Servico>, AppError> {
        self.repo.find_by_barbearia_id(barbearia_id).await
    }

    /// Reconfere valor >= 0 e duração >= 0 antes de gravar.
    pub async fn save(&self, servico: Servico) -> Result<Servico, AppError> {
        servico.check_invariants()?;
        self.repo.save(servico).await
    }

    pub async fn create(&self, payload: ServicoPayload) -> Result<Servico, AppError> {
        payload.validate()?;
        let servico = self.save(payload.into_servico()?).await?;
        tracing::info!("Serviço {:?} criado", servico.id());
        Ok(servico)
    }

    pub async fn create_with_barbearia(
        &self,
        payload: ServicoPayload,
        barbearia_id: i64,
    ) -> Result<Servico, AppError> {
        payload.validate()?;

        if !self.barbearia_repo.exists_by_id(barbearia_id).await? {
            return Err(AppError::BarbeariaNotFound(barbearia_id));
        }

        let mut servico = payload.into_servico()?;
        servico.set_barbearia_id(Some(barbearia_id));

        let servico = self.save(servico).await?;
        tracing::info!("Serviço {:?} criado na barbearia {}", servico.id(), barbearia_id);
        Ok(servico)
    }

    pub async fn update(&self, id: i64, payload: ServicoPayload) -> Result<Servico, AppError> {
        payload.validate()?;

        let mut servico = self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Serviço não encontrado", id))?;

        payload.apply_to(&mut servico)?;
        self.save(servico).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::not_found("Serviço não encontrado", id));
        }
        self.repo.delete_by_id(id).await?;
        tracing::info!("Serviço {} removido", id);
        Ok(())
    }
}
