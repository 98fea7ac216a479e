// src/db/agenda_repo.rs

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{map_constraint_violation, Referencias},
    models::agenda::Agenda,
};

#[async_trait]
pub trait AgendaRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Agenda>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Agenda>, AppError>;
    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Agenda>, AppError>;
    async fn find_by_cliente_id(&self, cliente_id: i64) -> Result<Vec<Agenda>, AppError>;
    /// `inicio <= data <= fim`, ordenado por data.
    async fn find_by_data_between(
        &self,
        inicio: NaiveDateTime,
        fim: NaiveDateTime,
    ) -> Result<Vec<Agenda>, AppError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;
    async fn save(&self, agenda: Agenda) -> Result<Agenda, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgAgendaRepository {
    pool: PgPool,
}

impl PgAgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgendaRepository for PgAgendaRepository {
    async fn find_all(&self) -> Result<Vec<Agenda>, AppError> {
        let agendas = sqlx::query_as::<_, Agenda>("SELECT * FROM agendas ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(agendas)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Agenda>, AppError> {
        let agenda = sqlx::query_as::<_, Agenda>("SELECT * FROM agendas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agenda)
    }

    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Agenda>, AppError> {
        let agendas = sqlx::query_as::<_, Agenda>(
            "SELECT * FROM agendas WHERE barbearia_id = $1 ORDER BY id",
        )
            .bind(barbearia_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(agendas)
    }

    async fn find_by_cliente_id(&self, cliente_id: i64) -> Result<Vec<Agenda>, AppError> {
        let agendas = sqlx::query_as::<_, Agenda>(
            "SELECT * FROM agendas WHERE cliente_id = $1 ORDER BY id",
        )
            .bind(cliente_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(agendas)
    }

    async fn find_by_data_between(
        &self,
        inicio: NaiveDateTime,
        fim: NaiveDateTime,
    ) -> Result<Vec<Agenda>, AppError> {
        // BETWEEN é inclusivo nas duas pontas
        let agendas = sqlx::query_as::<_, Agenda>(
            "SELECT * FROM agendas WHERE data BETWEEN $1 AND $2 ORDER BY data, id",
        )
            .bind(inicio)
            .bind(fim)
            .fetch_all(&self.pool)
            .await?;
        Ok(agendas)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM agendas WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, agenda: Agenda) -> Result<Agenda, AppError> {
        let refs = Referencias {
            barbearia_id: agenda.barbearia_id,
            cliente_id: agenda.cliente_id,
            ..Default::default()
        };

        let Some(id) = agenda.id else {
            let inserted = sqlx::query_as::<_, Agenda>(
                r#"
                INSERT INTO agendas (data, descricao, barbearia_id, cliente_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
                .bind(agenda.data)
                .bind(&agenda.descricao)
                .bind(agenda.barbearia_id)
                .bind(agenda.cliente_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_constraint_violation(e, refs))?;
            return Ok(inserted);
        };

        let updated = sqlx::query_as::<_, Agenda>(
            r#"
            UPDATE agendas
            SET data = $2, descricao = $3, barbearia_id = $4, cliente_id = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(agenda.data)
            .bind(&agenda.descricao)
            .bind(agenda.barbearia_id)
            .bind(agenda.cliente_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_violation(e, refs))?;

        updated.ok_or_else(|| AppError::not_found("Agenda não encontrada", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM agendas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
