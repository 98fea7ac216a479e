// src/models/barbearia.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::{validate_not_blank, validate_optional_email, CNPJ_REGEX};

// A "dona" de clientes, serviços e agendas.
// Os filhos apontam para ela via barbearia_id; apagar a barbearia apaga os filhos.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Barbearia {
    // None até o primeiro INSERT
    #[schema(example = 1)]
    pub id: Option<i64>,

    #[schema(example = "Barbearia do Zé")]
    pub nome: String,

    #[schema(example = "11.111.111/0001-11")]
    pub cnpj: Option<String>,

    #[schema(example = "(11) 99999-8888")]
    pub telefone: Option<String>,

    #[schema(example = "contato@barbeariadoze.com")]
    pub email: Option<String>,

    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub endereco: Option<String>,
}

impl Barbearia {
    /// CNPJ que participa da regra de unicidade (vazio não conta).
    pub fn cnpj_preenchido(&self) -> Option<&str> {
        self.cnpj.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarbeariaPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Barbearia do Zé")]
    pub nome: String,

    #[validate(regex(path = *CNPJ_REGEX, message = "CNPJ inválido"))]
    #[schema(example = "11.111.111/0001-11")]
    pub cnpj: Option<String>,

    pub telefone: Option<String>,

    #[validate(custom(function = "validate_optional_email"))]
    #[schema(example = "contato@barbeariadoze.com")]
    pub email: Option<String>,

    pub endereco: Option<String>,
}

impl BarbeariaPayload {
    /// Sobrescreve os campos mutáveis; o id é preservado.
    pub fn apply_to(self, barbearia: &mut Barbearia) {
        barbearia.nome = self.nome;
        barbearia.cnpj = self.cnpj;
        barbearia.telefone = self.telefone;
        barbearia.email = self.email;
        barbearia.endereco = self.endereco;
    }
}

impl From<BarbeariaPayload> for Barbearia {
    fn from(payload: BarbeariaPayload) -> Self {
        Barbearia {
            id: None,
            nome: payload.nome,
            cnpj: payload.cnpj,
            telefone: payload.telefone,
            email: payload.email,
            endereco: payload.endereco,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(email: Option<&str>) -> BarbeariaPayload {
        BarbeariaPayload {
            nome: "Shop".into(),
            cnpj: None,
            telefone: None,
            email: email.map(String::from),
            endereco: None,
        }
    }

    #[test]
    fn email_vazio_e_aceito() {
        assert!(payload(Some("")).validate().is_ok());
        assert!(payload(None).validate().is_ok());
        assert!(payload(Some("shop@teste.com")).validate().is_ok());
    }

    #[test]
    fn email_mal_formado_e_recusado() {
        let errors = payload(Some("shop.teste.com")).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
