// src/common/validation.rs

use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidateEmail, ValidationError};

// Pontuação opcional: "11.111.111/0001-11" e "11111111000111" são aceitos.
pub static CNPJ_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2}$").expect("regex de CNPJ"));

pub static CPF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.?\d{3}\.?\d{3}-?\d{2}$").expect("regex de CPF"));

/// `length(min = 1)` deixa passar "   "; aqui o nome precisa ter conteúdo.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O nome é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

/// E-mail opcional: `""` conta como não informado, o resto precisa ser válido.
pub fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("Email inválido".into());
    Err(err)
}
