// src/models/agenda.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agenda {
    #[schema(example = 1)]
    pub id: Option<i64>,

    // Horário local, sem fuso (TIMESTAMP no Postgres)
    #[schema(value_type = String, format = DateTime, example = "2024-01-15T14:30:00")]
    pub data: NaiveDateTime,

    #[schema(example = "Corte + barba")]
    pub descricao: Option<String>,

    pub barbearia_id: Option<i64>,

    pub cliente_id: Option<i64>,
}

// `data` é Option aqui para que a ausência chegue até o serviço
// e vire "Data é obrigatória" (400) em vez de um erro de desserialização.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgendaPayload {
    #[schema(value_type = Option<String>, format = DateTime, example = "2024-01-15T14:30:00")]
    pub data: Option<NaiveDateTime>,

    pub descricao: Option<String>,
}

impl AgendaPayload {
    fn data_obrigatoria(&self) -> Result<NaiveDateTime, AppError> {
        self.data.ok_or(AppError::RequiredField("Data é obrigatória"))
    }

    pub fn into_agenda(self) -> Result<Agenda, AppError> {
        let data = self.data_obrigatoria()?;
        Ok(Agenda {
            id: None,
            data,
            descricao: self.descricao,
            barbearia_id: None,
            cliente_id: None,
        })
    }

    /// Só data e descrição mudam; vínculos ficam como estão.
    pub fn apply_to(self, agenda: &mut Agenda) -> Result<(), AppError> {
        agenda.data = self.data_obrigatoria()?;
        agenda.descricao = self.descricao;
        Ok(())
    }
}
