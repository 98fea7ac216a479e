// src/handlers/agendas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::agenda::{Agenda, AgendaPayload},
};

/// Intervalo fechado `[inicio, fim]`, em ISO-8601 sem fuso (`2024-01-31T23:59:59`).
#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodoQuery {
    #[param(value_type = String, example = "2024-01-01T00:00:00")]
    pub inicio: NaiveDateTime,
    #[param(value_type = String, example = "2024-01-31T23:59:59")]
    pub fim: NaiveDateTime,
}

// GET /api/agendas
#[utoipa::path(
    get,
    path = "/api/agendas",
    tag = "Agendas",
    responses(
        (status = 200, description = "Lista de agendas", body = Vec<Agenda>)
    )
)]
pub async fn list_agendas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let agendas = app_state.agenda_service.find_all().await?;
    Ok((StatusCode::OK, Json(agendas)))
}

// GET /api/agendas/barbearia/{barbeariaId}
#[utoipa::path(
    get,
    path = "/api/agendas/barbearia/{barbeariaId}",
    tag = "Agendas",
    params(("barbeariaId" = i64, Path, description = "ID da barbearia")),
    responses(
        (status = 200, description = "Agendas da barbearia", body = Vec<Agenda>)
    )
)]
pub async fn list_agendas_by_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(barbearia_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agendas = app_state.agenda_service.find_by_barbearia_id(barbearia_id).await?;
    Ok((StatusCode::OK, Json(agendas)))
}

// GET /api/agendas/cliente/{clienteId}
#[utoipa::path(
    get,
    path = "/api/agendas/cliente/{clienteId}",
    tag = "Agendas",
    params(("clienteId" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Agendas do cliente", body = Vec<Agenda>)
    )
)]
pub async fn list_agendas_by_cliente(
    State(app_state): State<AppState>,
    WithRejection(Path(cliente_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agendas = app_state.agenda_service.find_by_cliente_id(cliente_id).await?;
    Ok((StatusCode::OK, Json(agendas)))
}

// GET /api/agendas/periodo?inicio=...&fim=...
#[utoipa::path(
    get,
    path = "/api/agendas/periodo",
    tag = "Agendas",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Agendas no intervalo, em ordem de data", body = Vec<Agenda>),
        (status = 400, description = "Datas mal formatadas")
    )
)]
pub async fn list_agendas_by_periodo(
    State(app_state): State<AppState>,
    WithRejection(Query(periodo), _): WithRejection<Query<PeriodoQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agendas = app_state.agenda_service
        .find_by_periodo(periodo.inicio, periodo.fim)
        .await?;
    Ok((StatusCode::OK, Json(agendas)))
}

// GET /api/agendas/{id}
#[utoipa::path(
    get,
    path = "/api/agendas/{id}",
    tag = "Agendas",
    params(("id" = i64, Path, description = "ID da agenda")),
    responses(
        (status = 200, description = "Agenda encontrada", body = Agenda),
        (status = 404, description = "Agenda não encontrada")
    )
)]
pub async fn get_agenda(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agenda = app_state.agenda_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Agenda não encontrada", id))?;

    Ok((StatusCode::OK, Json(agenda)))
}

// POST /api/agendas
#[utoipa::path(
    post,
    path = "/api/agendas",
    tag = "Agendas",
    request_body = AgendaPayload,
    responses(
        (status = 201, description = "Agenda criada", body = Agenda),
        (status = 400, description = "Data ausente ou inválida")
    )
)]
pub async fn create_agenda(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<AgendaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agenda = app_state.agenda_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(agenda)))
}

// POST /api/agendas/barbearia/{barbeariaId}
#[utoipa::path(
    post,
    path = "/api/agendas/barbearia/{barbeariaId}",
    tag = "Agendas",
    params(("barbeariaId" = i64, Path, description = "ID da barbearia")),
    request_body = AgendaPayload,
    responses(
        (status = 201, description = "Agenda criada na barbearia", body = Agenda),
        (status = 400, description = "Data ausente ou barbearia inexistente")
    )
)]
pub async fn create_agenda_with_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(barbearia_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<AgendaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agenda = app_state.agenda_service
        .create_with_barbearia(payload, barbearia_id)
        .await?;
    Ok((StatusCode::CREATED, Json(agenda)))
}

// POST /api/agendas/barbearia/{barbeariaId}/cliente/{clienteId}
// Cliente inexistente não é erro: a agenda sai sem cliente.
#[utoipa::path(
    post,
    path = "/api/agendas/barbearia/{barbeariaId}/cliente/{clienteId}",
    tag = "Agendas",
    params(
        ("barbeariaId" = i64, Path, description = "ID da barbearia"),
        ("clienteId" = i64, Path, description = "ID do cliente")
    ),
    request_body = AgendaPayload,
    responses(
        (status = 201, description = "Agenda criada", body = Agenda),
        (status = 400, description = "Data ausente ou barbearia inexistente")
    )
)]
pub async fn create_agenda_with_barbearia_and_cliente(
    State(app_state): State<AppState>,
    WithRejection(Path((barbearia_id, cliente_id)), _): WithRejection<Path<(i64, i64)>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<AgendaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agenda = app_state.agenda_service
        .create_with_barbearia_and_cliente(payload, barbearia_id, Some(cliente_id))
        .await?;
    Ok((StatusCode::CREATED, Json(agenda)))
}

// PUT /api/agendas/{id}
#[utoipa::path(
    put,
    path = "/api/agendas/{id}",
    tag = "Agendas",
    params(("id" = i64, Path, description = "ID da agenda")),
    request_body = AgendaPayload,
    responses(
        (status = 200, description = "Agenda atualizada", body = Agenda),
        (status = 400, description = "Data ausente ou inválida"),
        (status = 404, description = "Agenda não encontrada")
    )
)]
pub async fn update_agenda(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<AgendaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let agenda = app_state.agenda_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(agenda)))
}

// DELETE /api/agendas/{id}
#[utoipa::path(
    delete,
    path = "/api/agendas/{id}",
    tag = "Agendas",
    params(("id" = i64, Path, description = "ID da agenda")),
    responses(
        (status = 204, description = "Agenda removida"),
        (status = 404, description = "Agenda não encontrada")
    )
)]
pub async fn delete_agenda(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.agenda_service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
