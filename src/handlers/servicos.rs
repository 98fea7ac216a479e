// src/handlers/servicos.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    models::servico::{Servico, ServicoPayload},
};

#[utoipa::path(
    get,
    path = "/api/servicos",
    tag = "Serviços",
    responses(
        (status = 200, description = "Lista de serviços", body = Vec<Servico>)
    )
)]
pub async fn list_servicos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let servicos = app_state.servico_service.find_all().await?;
    Ok((StatusCode::OK, Json(servicos)))
}

#[utoipa::path(
    get,
    path = "/api/servicos/barbearia/{barbeariaId}",
    tag = "Serviços",
    params(("barbeariaId" = i64, Path, description = "ID da barbearia")),
    responses(
        (status = 200, description = "Serviços da barbearia", body = Vec<Servico>)
    )
)]
pub async fn list_servicos_by_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(barbearia_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let servicos = app_state.servico_service.find_by_barbearia_id(barbearia_id).await?;
    Ok((StatusCode::OK, Json(servicos)))
}

#[utoipa::path(
    get,
    path = "/api/servicos/{id}",
    tag = "Serviços",
    params(("id" = i64, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço encontrado", body = Servico),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_servico(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let servico = app_state.servico_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Serviço não encontrado", id))?;

    Ok((StatusCode::OK, Json(servico)))
}

#[utoipa::path(
    post,
    path = "/api/servicos",
    tag = "Serviços",
    request_body = ServicoPayload,
    responses(
        (status = 201, description = "Serviço criado", body = Servico),
        (status = 400, description = "Valor ou duração inválidos")
    )
)]
pub async fn create_servico(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ServicoPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let servico = app_state.servico_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(servico)))
}

#[utoipa::path(
    post,
    path = "/api/servicos/barbearia/{barbeariaId}",
    tag = "Serviços",
    params(("barbeariaId" = i64, Path, description = "ID da barbearia")),
    request_body = ServicoPayload,
    responses(
        (status = 201, description = "Serviço criado e vinculado", body = Servico),
        (status = 400, description = "Valor ou duração inválidos, ou barbearia inexistente")
    )
)]
pub async fn create_servico_with_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(barbearia_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ServicoPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let servico = app_state.servico_service
        .create_with_barbearia(payload, barbearia_id)
        .await?;
    Ok((StatusCode::CREATED, Json(servico)))
}

#[utoipa::path(
    put,
    path = "/api/servicos/{id}",
    tag = "Serviços",
    params(("id" = i64, Path, description = "ID do serviço")),
    request_body = ServicoPayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Servico),
        (status = 400, description = "Valor ou duração inválidos"),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn update_servico(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ServicoPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let servico = app_state.servico_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(servico)))
}

#[utoipa::path(
    delete,
    path = "/api/servicos/{id}",
    tag = "Serviços",
    params(("id" = i64, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn delete_servico(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.servico_service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
