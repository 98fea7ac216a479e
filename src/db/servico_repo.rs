// src/db/servico_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{map_constraint_violation, Referencias},
    models::servico::Servico,
};

#[async_trait]
pub trait ServicoRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Servico>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Servico>, AppError>;
    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Servico>, AppError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;
    /// Grava o serviço e a lista de funcionários como uma unidade.
    async fn save(&self, servico: Servico) -> Result<Servico, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

// A lista de funcionários mora em 'servico_funcionarios' e volta como TEXT[]
// na ordem em que foi gravada.
const SELECT_SERVICO: &str = r#"
    SELECT
        s.id, s.nome, s.valor, s.duracao, s.descricao, s.barbearia_id,
        ARRAY(
            SELECT f.funcionario FROM servico_funcionarios f
            WHERE f.servico_id = s.id
            ORDER BY f.posicao
        ) AS funcionarios
    FROM servicos s
"#;

#[derive(Clone)]
pub struct PgServicoRepository {
    pool: PgPool,
}

impl PgServicoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServicoRepository for PgServicoRepository {
    async fn find_all(&self) -> Result<Vec<Servico>, AppError> {
        let sql = format!("{SELECT_SERVICO} ORDER BY s.id");
        let servicos = sqlx::query_as::<_, Servico>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(servicos)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Servico>, AppError> {
        let sql = format!("{SELECT_SERVICO} WHERE s.id = $1");
        let servico = sqlx::query_as::<_, Servico>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(servico)
    }

    async fn find_by_barbearia_id(&self, barbearia_id: i64) -> Result<Vec<Servico>, AppError> {
        let sql = format!("{SELECT_SERVICO} WHERE s.barbearia_id = $1 ORDER BY s.id");
        let servicos = sqlx::query_as::<_, Servico>(&sql)
            .bind(barbearia_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(servicos)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM servicos WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, servico: Servico) -> Result<Servico, AppError> {
        let refs = Referencias { barbearia_id: servico.barbearia_id(), ..Default::default() };

        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Linha principal
        let id: i64 = match servico.id() {
            None => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO servicos (nome, valor, duracao, descricao, barbearia_id)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                    .bind(servico.nome())
                    .bind(servico.valor())
                    .bind(servico.duracao())
                    .bind(servico.descricao())
                    .bind(servico.barbearia_id())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| map_constraint_violation(e, refs))?
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE servicos
                    SET nome = $2, valor = $3, duracao = $4, descricao = $5, barbearia_id = $6
                    WHERE id = $1
                    "#,
                )
                    .bind(id)
                    .bind(servico.nome())
                    .bind(servico.valor())
                    .bind(servico.duracao())
                    .bind(servico.descricao())
                    .bind(servico.barbearia_id())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| map_constraint_violation(e, refs))?;

                if result.rows_affected() == 0 {
                    // tx cai no drop => rollback
                    return Err(AppError::not_found("Serviço não encontrado", id));
                }

                sqlx::query("DELETE FROM servico_funcionarios WHERE servico_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
        };

        // 3. Funcionários, preservando a ordem
        sqlx::query(
            r#"
            INSERT INTO servico_funcionarios (servico_id, posicao, funcionario)
            SELECT $1, t.ord::INT, t.funcionario
            FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(funcionario, ord)
            "#,
        )
            .bind(id)
            .bind(servico.funcionarios())
            .execute(&mut *tx)
            .await?;

        // 4. Relê o que ficou gravado, ainda dentro da transação
        let sql = format!("{SELECT_SERVICO} WHERE s.id = $1");
        let gravado = sqlx::query_as::<_, Servico>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        // 5. Commit
        tx.commit().await?;

        Ok(gravado)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        // servico_funcionarios tem ON DELETE CASCADE
        sqlx::query("DELETE FROM servicos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
