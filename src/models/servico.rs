// src/models/servico.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{error::AppError, validation::validate_not_blank};

/// Duração assumida quando o cliente da API não informa (minutos).
pub const DURACAO_PADRAO: i32 = 30;

// Os campos são privados: valor e duração só entram pelos mutators,
// que recusam negativos. A lista de funcionários é sempre copiada na escrita
// e só sai emprestada (&[String]) na leitura.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Servico {
    #[schema(example = 1)]
    id: Option<i64>,

    #[schema(example = "Corte")]
    nome: String,

    #[schema(value_type = f64, example = 35.0)]
    valor: Decimal,

    #[schema(example = json!(["João", "Pedro"]))]
    funcionarios: Vec<String>,

    #[schema(example = 30)]
    duracao: i32,

    descricao: Option<String>,

    barbearia_id: Option<i64>,
}

impl Servico {
    pub fn new(
        nome: impl Into<String>,
        valor: Decimal,
        funcionarios: &[String],
        duracao: Option<i32>,
        descricao: Option<String>,
    ) -> Result<Self, AppError> {
        let mut servico = Servico {
            id: None,
            nome: nome.into(),
            valor: Decimal::ZERO,
            funcionarios: Vec::new(),
            duracao: DURACAO_PADRAO,
            descricao,
            barbearia_id: None,
        };
        servico.set_valor(valor)?;
        servico.set_duracao(duracao.unwrap_or(DURACAO_PADRAO))?;
        servico.set_funcionarios(funcionarios);
        Ok(servico)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn set_nome(&mut self, nome: impl Into<String>) {
        self.nome = nome.into();
    }

    pub fn valor(&self) -> Decimal {
        self.valor
    }

    pub fn set_valor(&mut self, valor: Decimal) -> Result<(), AppError> {
        if valor < Decimal::ZERO {
            return Err(AppError::InvalidValor);
        }
        self.valor = valor;
        Ok(())
    }

    pub fn funcionarios(&self) -> &[String] {
        &self.funcionarios
    }

    pub fn set_funcionarios(&mut self, funcionarios: &[String]) {
        self.funcionarios = funcionarios.to_vec();
    }

    pub fn duracao(&self) -> i32 {
        self.duracao
    }

    pub fn set_duracao(&mut self, duracao: i32) -> Result<(), AppError> {
        if duracao < 0 {
            return Err(AppError::InvalidDuracao);
        }
        self.duracao = duracao;
        Ok(())
    }

    pub fn descricao(&self) -> Option<&str> {
        self.descricao.as_deref()
    }

    pub fn set_descricao(&mut self, descricao: Option<String>) {
        self.descricao = descricao;
    }

    pub fn barbearia_id(&self) -> Option<i64> {
        self.barbearia_id
    }

    pub fn set_barbearia_id(&mut self, barbearia_id: Option<i64>) {
        self.barbearia_id = barbearia_id;
    }

    /// Reconfere as invariantes. Linhas vindas do banco (FromRow) não passam
    /// pelos mutators, então o save chama isto antes de gravar.
    pub fn check_invariants(&self) -> Result<(), AppError> {
        if self.valor < Decimal::ZERO {
            return Err(AppError::InvalidValor);
        }
        if self.duracao < 0 {
            return Err(AppError::InvalidDuracao);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicoPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Corte")]
    pub nome: String,

    #[schema(value_type = Option<f64>, example = 35.0)]
    pub valor: Option<Decimal>,

    #[serde(default)]
    #[schema(example = json!(["João", "Pedro"]))]
    pub funcionarios: Vec<String>,

    // Ausente => DURACAO_PADRAO
    #[schema(example = 30)]
    pub duracao: Option<i32>,

    pub descricao: Option<String>,
}

impl ServicoPayload {
    fn valor_obrigatorio(&self) -> Result<Decimal, AppError> {
        self.valor.ok_or(AppError::RequiredField("Valor é obrigatório"))
    }

    pub fn into_servico(self) -> Result<Servico, AppError> {
        let valor = self.valor_obrigatorio()?;
        Servico::new(self.nome, valor, &self.funcionarios, self.duracao, self.descricao)
    }

    /// Sobrescreve os campos mutáveis passando pelos mutators; id e barbearia_id ficam.
    pub fn apply_to(self, servico: &mut Servico) -> Result<(), AppError> {
        let valor = self.valor_obrigatorio()?;
        servico.set_valor(valor)?;
        servico.set_duracao(self.duracao.unwrap_or(DURACAO_PADRAO))?;
        servico.set_nome(self.nome);
        servico.set_funcionarios(&self.funcionarios);
        servico.set_descricao(self.descricao);
        Ok(())
    }
}
