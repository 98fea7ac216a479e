// src/services/cliente_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{BarbeariaRepository, ClienteRepository},
    models::cliente::{Cliente, ClientePayload},
};

#[derive(Clone)]
pub struct ClienteService {
    repo: Arc<dyn ClienteRepository>,
    barbearia_repo: Arc<dyn BarbeariaRepository>,
}

impl ClienteService {
    pub fn new(
        repo: Arc<dyn ClienteRepository>,
        barbearia_repo: Arc<dyn BarbeariaRepository>,
    ) -> Self {
        Self { repo, barbearia_repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Cliente>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Cliente>, AppError> {
        self.repo.find_by_cpf(cpf).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError> {
        self.repo.find_by_email(email).await
    }

    pub async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Cliente>, AppError> {
        self.repo.find_by_barbearia_id(barbearia_id).await
    }

    /// Mesma regra do CNPJ, agora para CPF.
    pub async fn save(&self, cliente: Cliente) -> Result<Cliente, AppError> {
        if let Some(cpf) = cliente.cpf_preenchido() {
            if let Some(existente) = self.repo.find_by_cpf(cpf).await? {
                if existente.id != cliente.id {
                    tracing::warn!("CPF já pertence ao cliente {:?}", existente.id);
                    return Err(AppError::DuplicateTaxId("CPF"));
                }
            }
        }
        self.repo.save(cliente).await
    }

    pub async fn create(&self, payload: ClientePayload) -> Result<Cliente, AppError> {
        payload.validate()?;
        let cliente = self.save(payload.into()).await?;
        tracing::info!("Cliente {:?} criado", cliente.id);
        Ok(cliente)
    }

    pub async fn create_with_barbearia(
        &self,
        payload: ClientePayload,
        barbearia_id: i64,
    ) -> Result<Cliente, AppError> {
        payload.validate()?;

        if !self.barbearia_repo.exists_by_id(barbearia_id).await? {
            return Err(AppError::BarbeariaNotFound(barbearia_id));
        }

        let mut cliente: Cliente = payload.into();
        cliente.barbearia_id = Some(barbearia_id);

        let cliente = self.save(cliente).await?;
        tracing::info!("Cliente {:?} criado na barbearia {}", cliente.id, barbearia_id);
        Ok(cliente)
    }

    pub async fn update(&self, id: i64, payload: ClientePayload) -> Result<Cliente, AppError> {
        payload.validate()?;

        let mut cliente = self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Cliente não encontrado", id))?;

        payload.apply_to(&mut cliente);
        self.save(cliente).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::not_found("Cliente não encontrado", id));
        }
        self.repo.delete_by_id(id).await?;
        tracing::info!("Cliente {} removido", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, models::barbearia::Barbearia};

    struct Ctx {
        store: Arc<MemoryStore>,
        svc: ClienteService,
    }

    fn ctx() -> Ctx {
        let store = Arc::new(MemoryStore::new());
        let svc = ClienteService::new(store.clone(), store.clone());
        Ctx { store, svc }
    }

    fn payload(nome: &str, cpf: Option<&str>) -> ClientePayload {
        ClientePayload {
            nome: nome.to_string(),
            cpf: cpf.map(str::to_string),
            telefone: None,
            email: None,
            endereco: None,
        }
    }

    async fn nova_barbearia(store: &MemoryStore) -> i64 {
        let b = Barbearia {
            id: None,
            nome: "Shop".into(),
            cnpj: None,
            telefone: None,
            email: None,
            endereco: None,
        };
        BarbeariaRepository::save(store, b).await.unwrap().id.unwrap()
    }

    #[tokio::test]
    async fn cpf_duplicado_e_recusado() {
        let Ctx { svc, .. } = ctx();
        svc.create(payload("Ana", Some("123.456.789-09"))).await.unwrap();

        let err = svc.create(payload("Bia", Some("123.456.789-09"))).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateTaxId("CPF")));
        assert_eq!(svc.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_mantem_cpf_e_vinculo() {
        let Ctx { store, svc } = ctx();
        let barbearia_id = nova_barbearia(&store).await;
        let c = svc
            .create_with_barbearia(payload("Ana", Some("12345678909")), barbearia_id)
            .await
            .unwrap();

        let atualizado = svc.update(c.id.unwrap(), payload("Ana Souza", Some("12345678909"))).await.unwrap();
        assert_eq!(atualizado.nome, "Ana Souza");
        assert_eq!(atualizado.barbearia_id, Some(barbearia_id));
    }

    #[tokio::test]
    async fn vinculo_com_barbearia_inexistente_nao_grava() {
        let Ctx { svc, .. } = ctx();
        let err = svc.create_with_barbearia(payload("Ana", None), 999).await.unwrap_err();
        assert!(matches!(err, AppError::BarbeariaNotFound(999)));
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cliente_sem_barbearia_e_filtro_por_barbearia() {
        let Ctx { store, svc } = ctx();
        let barbearia_id = nova_barbearia(&store).await;

        let solto = svc.create(payload("Solto", None)).await.unwrap();
        assert_eq!(solto.barbearia_id, None);
        svc.create_with_barbearia(payload("Vinculado", None), barbearia_id).await.unwrap();

        let da_barbearia = svc.find_by_barbearia_id(barbearia_id).await.unwrap();
        assert_eq!(da_barbearia.len(), 1);
        assert_eq!(da_barbearia[0].nome, "Vinculado");
    }

    #[tokio::test]
    async fn delete_de_inexistente() {
        let Ctx { svc, .. } = ctx();
        assert!(matches!(svc.delete_by_id(1).await, Err(AppError::NotFound(_))));
    }
}
