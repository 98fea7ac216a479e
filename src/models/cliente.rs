// src/models/cliente.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::{validate_not_blank, validate_optional_email, CPF_REGEX};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    #[schema(example = 1)]
    pub id: Option<i64>,

    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[schema(example = "123.456.789-09")]
    pub cpf: Option<String>,

    pub telefone: Option<String>,

    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    pub endereco: Option<String>,

    // Cliente pode existir sem barbearia.
    pub barbearia_id: Option<i64>,
}

impl Cliente {
    pub fn cpf_preenchido(&self) -> Option<&str> {
        self.cpf.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[validate(regex(path = *CPF_REGEX, message = "CPF inválido"))]
    #[schema(example = "123.456.789-09")]
    pub cpf: Option<String>,

    pub telefone: Option<String>,

    #[validate(custom(function = "validate_optional_email"))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    pub endereco: Option<String>,
}

impl ClientePayload {
    /// Sobrescreve os campos mutáveis; id e barbearia_id ficam como estão.
    pub fn apply_to(self, cliente: &mut Cliente) {
        cliente.nome = self.nome;
        cliente.cpf = self.cpf;
        cliente.telefone = self.telefone;
        cliente.email = self.email;
        cliente.endereco = self.endereco;
    }
}

impl From<ClientePayload> for Cliente {
    fn from(payload: ClientePayload) -> Self {
        Cliente {
            id: None,
            nome: payload.nome,
            cpf: payload.cpf,
            telefone: payload.telefone,
            email: payload.email,
            endereco: payload.endereco,
            barbearia_id: None,
        }
    }
}
