// src/services/agenda_service.rs

use std::sync::Arc;

use chrono::NaiveDateTime;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{AgendaRepository, BarbeariaRepository, ClienteRepository},
    models::agenda::{Agenda, AgendaPayload},
};

#[derive(Clone)]
pub struct AgendaService {
    repo: Arc<dyn AgendaRepository>,
    barbearia_repo: Arc<dyn BarbeariaRepository>,
    cliente_repo: Arc<dyn ClienteRepository>,
}

impl AgendaService {
    pub fn new(
        repo: Arc<dyn AgendaRepository>,
        barbearia_repo: Arc<dyn BarbeariaRepository>,
        cliente_repo: Arc<dyn ClienteRepository>,
    ) -> Self {
        Self { repo, barbearia_repo, cliente_repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Agenda>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Agenda>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Agenda>, AppError> {
        self.repo.find_by_barbearia_id(barbearia_id).await
    }

    pub async fn find_by_cliente_id(&self, cliente_id: i64) -> Result<Vec<Agenda>, AppError> {
        self.repo.find_by_cliente_id(cliente_id).await
    }

    /// Agendas com `inicio <= data <= fim`. Intervalo invertido devolve vazio.
    pub async fn find_by_periodo(
        &self,
        inicio: NaiveDateTime,
        fim: NaiveDateTime,
    ) -> Result<Vec<Agenda>, AppError> {
        self.repo.find_by_data_between(inicio, fim).await
    }

    // A data já é obrigatória no tipo; o que chega aqui é sempre gravável.
    pub async fn save(&self, agenda: Agenda) -> Result<Agenda, AppError> {
        self.repo.save(agenda).await
    }

    pub async fn create(&self, payload: AgendaPayload) -> Result<Agenda, AppError> {
        payload.validate()?;
        let agenda = self.save(payload.into_agenda()?).await?;
        tracing::info!("Agenda {:?} criada para {}", agenda.id, agenda.data);
        Ok(agenda)
    }

    pub async fn create_with_barbearia(
        &self,
        payload: AgendaPayload,
        barbearia_id: i64,
    ) -> Result<Agenda, AppError> {
        self.create_with_barbearia_and_cliente(payload, barbearia_id, None).await
    }

    /// A barbearia precisa existir. O cliente é opcional: se o id não existir,
    /// a agenda é criada sem cliente em vez de falhar.
    pub async fn create_with_barbearia_and_cliente(
        &self,
        payload: AgendaPayload,
        barbearia_id: i64,
        cliente_id: Option<i64>,
    ) -> Result<Agenda, AppError> {
        payload.validate()?;

        if !self.barbearia_repo.exists_by_id(barbearia_id).await? {
            return Err(AppError::BarbeariaNotFound(barbearia_id));
        }

        let mut agenda = payload.into_agenda()?;
        agenda.barbearia_id = Some(barbearia_id);

        if let Some(cliente_id) = cliente_id {
            if self.cliente_repo.exists_by_id(cliente_id).await? {
                agenda.cliente_id = Some(cliente_id);
            } else {
                tracing::debug!("Cliente {} não existe; agenda segue sem cliente", cliente_id);
            }
        }

        let agenda = self.save(agenda).await?;
        tracing::info!("Agenda {:?} criada na barbearia {}", agenda.id, barbearia_id);
        Ok(agenda)
    }

    pub async fn update(&self, id: i64, payload: AgendaPayload) -> Result<Agenda, AppError> {
        payload.validate()?;

        let mut agenda = self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Agenda não encontrada", id))?;

        payload.apply_to(&mut agenda)?;
        self.save(agenda).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::not_found("Agenda não encontrada", id));
        }
        self.repo.delete_by_id(id).await?;
        tracing::info!("Agenda {} removida", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::{barbearia::Barbearia, cliente::Cliente},
        services::{BarbeariaService, ClienteService},
    };
    use chrono::NaiveDate;

    struct Ctx {
        store: Arc<MemoryStore>,
        svc: AgendaService,
    }

    fn ctx() -> Ctx {
        let store = Arc::new(MemoryStore::new());
        let svc = AgendaService::new(store.clone(), store.clone(), store.clone());
        Ctx { store, svc }
    }

    fn dt(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn payload(data: Option<NaiveDateTime>) -> AgendaPayload {
        AgendaPayload { data, descricao: Some("Corte".into()) }
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

    async fn novo_cliente(store: &MemoryStore, barbearia_id: Option<i64>) -> i64 {
        let c = Cliente {
            id: None,
            nome: "Ana".into(),
            cpf: None,
            telefone: None,
            email: None,
            endereco: None,
            barbearia_id,
        };
        ClienteRepository::save(store, c).await.unwrap().id.unwrap()
    }

    #[tokio::test]
    async fn sem_data_sempre_falha() {
        let Ctx { store, svc } = ctx();
        let barbearia_id = nova_barbearia(&store).await;

        assert!(matches!(svc.create(payload(None)).await, Err(AppError::RequiredField(_))));
        assert!(matches!(
            svc.create_with_barbearia(payload(None), barbearia_id).await,
            Err(AppError::RequiredField(_))
        ));
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn barbearia_inexistente_nao_cria_linha() {
        let Ctx { svc, .. } = ctx();
        let err = svc.create_with_barbearia(payload(Some(dt(10, 9, 0, 0))), 999).await.unwrap_err();
        assert!(matches!(err, AppError::BarbeariaNotFound(999)));
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cliente_inexistente_e_ignorado() {
        let Ctx { store, svc } = ctx();
        let barbearia_id = nova_barbearia(&store).await;

        let agenda = svc
            .create_with_barbearia_and_cliente(payload(Some(dt(10, 9, 0, 0))), barbearia_id, Some(555))
            .await
            .unwrap();
        assert_eq!(agenda.barbearia_id, Some(barbearia_id));
        assert_eq!(agenda.cliente_id, None);
    }

    #[tokio::test]
    async fn vincula_barbearia_e_cliente() {
        let Ctx { store, svc } = ctx();
        let barbearia_id = nova_barbearia(&store).await;
        let cliente_id = novo_cliente(&store, Some(barbearia_id)).await;

        let agenda = svc
            .create_with_barbearia_and_cliente(payload(Some(dt(10, 9, 0, 0))), barbearia_id, Some(cliente_id))
            .await
            .unwrap();
        assert_eq!(agenda.cliente_id, Some(cliente_id));
        assert_eq!(svc.find_by_cliente_id(cliente_id).await.unwrap(), vec![agenda.clone()]);
        assert_eq!(svc.find_by_barbearia_id(barbearia_id).await.unwrap(), vec![agenda]);
    }

    #[tokio::test]
    async fn periodo_inclui_as_duas_pontas() {
        let Ctx { svc, .. } = ctx();
        let inicio = dt(1, 0, 0, 0);
        let fim = dt(31, 23, 59, 59);

        for data in [inicio, dt(15, 10, 0, 0), fim] {
            svc.create(payload(Some(data))).await.unwrap();
        }
        svc.create(payload(Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap())))
            .await
            .unwrap();
        svc.create(payload(Some(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(23, 59, 59).unwrap())))
            .await
            .unwrap();

        let no_mes = svc.find_by_periodo(inicio, fim).await.unwrap();
        let datas: Vec<_> = no_mes.iter().map(|a| a.data).collect();
        assert_eq!(datas, vec![inicio, dt(15, 10, 0, 0), fim]);

        assert!(svc.find_by_periodo(fim, inicio).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_preserva_vinculos() {
        let Ctx { store, svc } = ctx();
        let barbearia_id = nova_barbearia(&store).await;
        let agenda = svc.create_with_barbearia(payload(Some(dt(10, 9, 0, 0))), barbearia_id).await.unwrap();

        let nova = AgendaPayload { data: Some(dt(11, 14, 0, 0)), descricao: None };
        let atualizada = svc.update(agenda.id.unwrap(), nova).await.unwrap();
        assert_eq!(atualizada.data, dt(11, 14, 0, 0));
        assert_eq!(atualizada.descricao, None);
        assert_eq!(atualizada.barbearia_id, Some(barbearia_id));

        let sem_data = svc.update(agenda.id.unwrap(), payload(None)).await;
        assert!(matches!(sem_data, Err(AppError::RequiredField(_))));
    }

    #[tokio::test]
    async fn apagar_barbearia_leva_tudo_junto() {
        let Ctx { store, svc } = ctx();
        let barbearias = BarbeariaService::new(store.clone());
        let clientes = ClienteService::new(store.clone(), store.clone());

        let barbearia_id = nova_barbearia(&store).await;
        let outra_id = nova_barbearia(&store).await;
        let cliente_id = novo_cliente(&store, Some(barbearia_id)).await;
        let servico = crate::models::servico::ServicoPayload {
            nome: "Corte".into(),
            valor: Some(rust_decimal::Decimal::TEN),
            funcionarios: vec![],
            duracao: None,
            descricao: None,
        };
        let servicos = crate::services::ServicoService::new(store.clone(), store.clone());
        servicos.create_with_barbearia(servico, barbearia_id).await.unwrap();

        svc.create_with_barbearia_and_cliente(payload(Some(dt(5, 9, 0, 0))), barbearia_id, Some(cliente_id))
            .await
            .unwrap();
        // agenda em outra barbearia, mas com o cliente que vai sumir
        let sobrevivente = svc
            .create_with_barbearia_and_cliente(payload(Some(dt(6, 9, 0, 0))), outra_id, Some(cliente_id))
            .await
            .unwrap();

        barbearias.delete_by_id(barbearia_id).await.unwrap();

        assert!(clientes.find_by_barbearia_id(barbearia_id).await.unwrap().is_empty());
        assert!(servicos.find_by_barbearia_id(barbearia_id).await.unwrap().is_empty());
        assert!(svc.find_by_barbearia_id(barbearia_id).await.unwrap().is_empty());

        let restantes = svc.find_all().await.unwrap();
        assert_eq!(restantes.len(), 1);
        assert_eq!(restantes[0].id, sobrevivente.id);
        assert_eq!(restantes[0].cliente_id, None);
    }

    #[tokio::test]
    async fn delete_de_inexistente() {
        let Ctx { svc, .. } = ctx();
        assert!(matches!(svc.delete_by_id(3).await, Err(AppError::NotFound(_))));
    }
}
