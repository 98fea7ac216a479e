// src/services/barbearia_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::BarbeariaRepository,
    models::barbearia::{Barbearia, BarbeariaPayload},
};

#[derive(Clone)]
pub struct BarbeariaService {
    repo: Arc<dyn BarbeariaRepository>,
}

impl BarbeariaService {
    pub fn new(repo: Arc<dyn BarbeariaRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Barbearia>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Barbearia>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Barbearia>, AppError> {
        self.repo.find_by_cnpj(cnpj).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Barbearia>, AppError> {
        self.repo.find_by_email(email).await
    }

    /// Valida e persiste. Falha com `DuplicateTaxId` se OUTRA barbearia já tem o
    /// mesmo CNPJ (a própria linha, num update, não conta).
    pub async fn save(&self, barbearia: Barbearia) -> Result<Barbearia, AppError> {
        if let Some(cnpj) = barbearia.cnpj_preenchido() {
            if let Some(existente) = self.repo.find_by_cnpj(cnpj).await? {
                if existente.id != barbearia.id {
                    tracing::warn!("CNPJ {} já pertence à barbearia {:?}", cnpj, existente.id);
                    return Err(AppError::DuplicateTaxId("CNPJ"));
                }
            }
        }
        self.repo.save(barbearia).await
    }

    pub async fn create(&self, payload: BarbeariaPayload) -> Result<Barbearia, AppError> {
        payload.validate()?;
        let barbearia = self.save(payload.into()).await?;
        tracing::info!("Barbearia {:?} criada", barbearia.id);
        Ok(barbearia)
    }

    pub async fn update(&self, id: i64, payload: BarbeariaPayload) -> Result<Barbearia, AppError> {
        payload.validate()?;

        let mut barbearia = self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Barbearia não encontrada", id))?;

        payload.apply_to(&mut barbearia);
        self.save(barbearia).await
    }

    /// Remove a barbearia com todos os clientes, serviços e agendas dela.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::not_found("Barbearia não encontrada", id));
        }
        self.repo.delete_by_id(id).await?;
        tracing::info!("Barbearia {} removida (com clientes, serviços e agendas)", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> BarbeariaService {
        BarbeariaService::new(Arc::new(MemoryStore::new()))
    }

    fn payload(nome: &str, cnpj: Option<&str>) -> BarbeariaPayload {
        BarbeariaPayload {
            nome: nome.to_string(),
            cnpj: cnpj.map(str::to_string),
            telefone: None,
            email: Some("contato@shop.com".to_string()),
            endereco: None,
        }
    }

    #[tokio::test]
    async fn cnpj_duplicado_e_recusado() {
        let svc = service();
        let a = svc.create(payload("Shop A", Some("11.111.111/0001-11"))).await.unwrap();
        assert_eq!(a.id, Some(1));

        let err = svc.create(payload("Shop B", Some("11.111.111/0001-11"))).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateTaxId("CNPJ")));
        assert_eq!(svc.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_com_o_proprio_cnpj_passa() {
        let svc = service();
        let a = svc.create(payload("Shop A", Some("11.111.111/0001-11"))).await.unwrap();

        let atualizada = svc
            .update(a.id.unwrap(), payload("Shop A Renomeada", Some("11.111.111/0001-11")))
            .await
            .unwrap();
        assert_eq!(atualizada.id, a.id);
        assert_eq!(atualizada.nome, "Shop A Renomeada");
    }

    #[tokio::test]
    async fn update_para_cnpj_de_outra_falha() {
        let svc = service();
        svc.create(payload("Shop A", Some("11.111.111/0001-11"))).await.unwrap();
        let b = svc.create(payload("Shop B", Some("22.222.222/0001-22"))).await.unwrap();

        let err = svc
            .update(b.id.unwrap(), payload("Shop B", Some("11.111.111/0001-11")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateTaxId(_)));

        let intacta = svc.find_by_id(b.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(intacta.cnpj.as_deref(), Some("22.222.222/0001-22"));
    }

    #[tokio::test]
    async fn sem_cnpj_nao_colide() {
        let svc = service();
        svc.create(payload("Shop A", None)).await.unwrap();
        svc.create(payload("Shop B", None)).await.unwrap();
        assert_eq!(svc.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cnpj_mal_formado_e_email_invalido() {
        let svc = service();
        let err = svc.create(payload("Shop A", Some("123"))).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let mut p = payload("Shop A", None);
        p.email = Some("nao-e-email".into());
        assert!(matches!(svc.create(p).await, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn update_e_delete_de_id_inexistente() {
        let svc = service();
        assert!(matches!(svc.update(42, payload("X", None)).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete_by_id(42).await, Err(AppError::NotFound(_))));
        assert!(svc.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn busca_por_cnpj_e_email() {
        let svc = service();
        let a = svc.create(payload("Shop A", Some("11111111000111"))).await.unwrap();

        assert_eq!(svc.find_by_cnpj("11111111000111").await.unwrap(), Some(a.clone()));
        assert_eq!(svc.find_by_email("contato@shop.com").await.unwrap(), Some(a));
        assert!(svc.find_by_cnpj("99999999000199").await.unwrap().is_none());
    }
}
