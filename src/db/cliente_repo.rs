// src/db/cliente_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{map_constraint_violation, Referencias},
    models::cliente::Cliente,
};

#[async_trait]
pub trait ClienteRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Cliente>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError>;
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Cliente>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError>;
    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Cliente>, AppError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;
    async fn save(&self, cliente: Cliente) -> Result<Cliente, AppError>;
    /// Agendas que apontavam para o cliente ficam com cliente_id nulo.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgClienteRepository {
    pool: PgPool,
}

impl PgClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClienteRepository for PgClienteRepository {
    async fn find_all(&self) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(clientes)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            "SELECT * FROM clientes WHERE email = $1 ORDER BY id LIMIT 1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>(
            "SELECT * FROM clientes WHERE barbearia_id = $1 ORDER BY id",
        )
            .bind(barbearia_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(clientes)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clientes WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, cliente: Cliente) -> Result<Cliente, AppError> {
        let refs = Referencias {
            documento: Some("CPF"),
            barbearia_id: cliente.barbearia_id,
            ..Default::default()
        };

        let Some(id) = cliente.id else {
            let inserted = sqlx::query_as::<_, Cliente>(
                r#"
                INSERT INTO clientes (nome, cpf, telefone, email, endereco, barbearia_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
                .bind(&cliente.nome)
                .bind(&cliente.cpf)
                .bind(&cliente.telefone)
                .bind(&cliente.email)
                .bind(&cliente.endereco)
                .bind(cliente.barbearia_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_constraint_violation(e, refs))?;
            return Ok(inserted);
        };

        let updated = sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET nome = $2, cpf = $3, telefone = $4, email = $5, endereco = $6, barbearia_id = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(&cliente.nome)
            .bind(&cliente.cpf)
            .bind(&cliente.telefone)
            .bind(&cliente.email)
            .bind(&cliente.endereco)
            .bind(cliente.barbearia_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_violation(e, refs))?;

        updated.ok_or_else(|| AppError::not_found("Cliente não encontrado", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
