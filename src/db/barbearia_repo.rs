// src/db/barbearia_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{map_constraint_violation, Referencias},
    models::barbearia::Barbearia,
};

#[async_trait]
pub trait BarbeariaRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Barbearia>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Barbearia>, AppError>;
    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Barbearia>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Barbearia>, AppError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;
    /// INSERT quando `id` é None (devolve com o id gerado), UPDATE caso contrário.
    async fn save(&self, barbearia: Barbearia) -> Result<Barbearia, AppError>;
    /// Apaga a barbearia e, em cascata, seus clientes, serviços e agendas.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

// O repositório de barbearias, responsável pela tabela 'barbearias'
#[derive(Clone)]
pub struct PgBarbeariaRepository {
    pool: PgPool,
}

impl PgBarbeariaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarbeariaRepository for PgBarbeariaRepository {
    async fn find_all(&self) -> Result<Vec<Barbearia>, AppError> {
        let barbearias = sqlx::query_as::<_, Barbearia>("SELECT * FROM barbearias ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(barbearias)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Barbearia>, AppError> {
        let barbearia = sqlx::query_as::<_, Barbearia>("SELECT * FROM barbearias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(barbearia)
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Barbearia>, AppError> {
        let barbearia = sqlx::query_as::<_, Barbearia>("SELECT * FROM barbearias WHERE cnpj = $1")
            .bind(cnpj)
            .fetch_optional(&self.pool)
            .await?;
        Ok(barbearia)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Barbearia>, AppError> {
        // email não é UNIQUE: fica com a mais antiga
        let barbearia = sqlx::query_as::<_, Barbearia>(
            "SELECT * FROM barbearias WHERE email = $1 ORDER BY id LIMIT 1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(barbearia)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM barbearias WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, barbearia: Barbearia) -> Result<Barbearia, AppError> {
        let refs = Referencias { documento: Some("CNPJ"), ..Default::default() };

        let Some(id) = barbearia.id else {
            let inserted = sqlx::query_as::<_, Barbearia>(
                r#"
                INSERT INTO barbearias (nome, cnpj, telefone, email, endereco)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
                .bind(&barbearia.nome)
                .bind(&barbearia.cnpj)
                .bind(&barbearia.telefone)
                .bind(&barbearia.email)
                .bind(&barbearia.endereco)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_constraint_violation(e, refs))?;
            return Ok(inserted);
        };

        let updated = sqlx::query_as::<_, Barbearia>(
            r#"
            UPDATE barbearias
            SET nome = $2, cnpj = $3, telefone = $4, email = $5, endereco = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(&barbearia.nome)
            .bind(&barbearia.cnpj)
            .bind(&barbearia.telefone)
            .bind(&barbearia.email)
            .bind(&barbearia.endereco)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_violation(e, refs))?;

        updated.ok_or_else(|| AppError::not_found("Barbearia não encontrada", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        // ON DELETE CASCADE nas FKs de clientes, servicos e agendas
        sqlx::query("DELETE FROM barbearias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
