// src/handlers/barbearias.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::barbearia::{Barbearia, BarbeariaPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CnpjQuery {
    /// Com ou sem pontuação, exatamente como foi cadastrado
    pub cnpj: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

// GET /api/barbearias
#[utoipa::path(
    get,
    path = "/api/barbearias",
    tag = "Barbearias",
    responses(
        (status = 200, description = "Lista de barbearias", body = Vec<Barbearia>)
    )
)]
pub async fn list_barbearias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let barbearias = app_state.barbearia_service.find_all().await?;
    Ok((StatusCode::OK, Json(barbearias)))
}

// GET /api/barbearias/{id}
#[utoipa::path(
    get,
    path = "/api/barbearias/{id}",
    tag = "Barbearias",
    params(("id" = i64, Path, description = "ID da barbearia")),
    responses(
        (status = 200, description = "Barbearia encontrada", body = Barbearia),
        (status = 404, description = "Barbearia não encontrada")
    )
)]
pub async fn get_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let barbearia = app_state.barbearia_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Barbearia não encontrada", id))?;

    Ok((StatusCode::OK, Json(barbearia)))
}

// GET /api/barbearias/cnpj?cnpj=...
// (query string porque o CNPJ pontuado tem '/')
#[utoipa::path(
    get,
    path = "/api/barbearias/cnpj",
    tag = "Barbearias",
    params(CnpjQuery),
    responses(
        (status = 200, description = "Barbearia com o CNPJ", body = Barbearia),
        (status = 404, description = "Nenhuma barbearia com esse CNPJ")
    )
)]
pub async fn get_barbearia_by_cnpj(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CnpjQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let barbearia = app_state.barbearia_service
        .find_by_cnpj(&query.cnpj)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Barbearia não encontrada com CNPJ: {}", query.cnpj)))?;

    Ok((StatusCode::OK, Json(barbearia)))
}

// GET /api/barbearias/email?email=...
#[utoipa::path(
    get,
    path = "/api/barbearias/email",
    tag = "Barbearias",
    params(EmailQuery),
    responses(
        (status = 200, description = "Barbearia com o e-mail", body = Barbearia),
        (status = 404, description = "Nenhuma barbearia com esse e-mail")
    )
)]
pub async fn get_barbearia_by_email(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let barbearia = app_state.barbearia_service
        .find_by_email(&query.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Barbearia não encontrada com email: {}", query.email)))?;

    Ok((StatusCode::OK, Json(barbearia)))
}

// POST /api/barbearias
#[utoipa::path(
    post,
    path = "/api/barbearias",
    tag = "Barbearias",
    request_body = BarbeariaPayload,
    responses(
        (status = 201, description = "Barbearia criada", body = Barbearia),
        (status = 400, description = "Dados inválidos ou CNPJ já cadastrado")
    )
)]
pub async fn create_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BarbeariaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let barbearia = app_state.barbearia_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(barbearia)))
}

// PUT /api/barbearias/{id}
#[utoipa::path(
    put,
    path = "/api/barbearias/{id}",
    tag = "Barbearias",
    params(("id" = i64, Path, description = "ID da barbearia")),
    request_body = BarbeariaPayload,
    responses(
        (status = 200, description = "Barbearia atualizada", body = Barbearia),
        (status = 400, description = "Dados inválidos ou CNPJ já cadastrado"),
        (status = 404, description = "Barbearia não encontrada")
    )
)]
pub async fn update_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<BarbeariaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let barbearia = app_state.barbearia_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(barbearia)))
}

// DELETE /api/barbearias/{id}
// Leva junto clientes, serviços e agendas da barbearia.
#[utoipa::path(
    delete,
    path = "/api/barbearias/{id}",
    tag = "Barbearias",
    params(("id" = i64, Path, description = "ID da barbearia")),
    responses(
        (status = 204, description = "Barbearia removida"),
        (status = 404, description = "Barbearia não encontrada")
    )
)]
pub async fn delete_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.barbearia_service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
