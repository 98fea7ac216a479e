// src/handlers/clientes.rs

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
    handlers::barbearias::EmailQuery,
    models::cliente::{Cliente, ClientePayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CpfQuery {
    pub cpf: String,
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>)
    )
)]
pub async fn list_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.cliente_service.find_all().await?;
    Ok((StatusCode::OK, Json(clientes)))
}

// GET /api/clientes/barbearia/{barbeariaId}
#[utoipa::path(
    get,
    path = "/api/clientes/barbearia/{barbeariaId}",
    tag = "Clientes",
    params(("barbeariaId" = i64, Path, description = "ID da barbearia")),
    responses(
        (status = 200, description = "Clientes da barbearia", body = Vec<Cliente>)
    )
)]
pub async fn list_clientes_by_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(barbearia_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.cliente_service.find_by_barbearia_id(barbearia_id).await?;
    Ok((StatusCode::OK, Json(clientes)))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_cliente(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Cliente não encontrado", id))?;

    Ok((StatusCode::OK, Json(cliente)))
}

// GET /api/clientes/cpf?cpf=...
#[utoipa::path(
    get,
    path = "/api/clientes/cpf",
    tag = "Clientes",
    params(CpfQuery),
    responses(
        (status = 200, description = "Cliente com o CPF", body = Cliente),
        (status = 404, description = "Nenhum cliente com esse CPF")
    )
)]
pub async fn get_cliente_by_cpf(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CpfQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service
        .find_by_cpf(&query.cpf)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cliente não encontrado com CPF: {}", query.cpf)))?;

    Ok((StatusCode::OK, Json(cliente)))
}

// GET /api/clientes/email?email=...
#[utoipa::path(
    get,
    path = "/api/clientes/email",
    tag = "Clientes",
    params(EmailQuery),
    responses(
        (status = 200, description = "Cliente com o e-mail", body = Cliente),
        (status = 404, description = "Nenhum cliente com esse e-mail")
    )
)]
pub async fn get_cliente_by_email(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service
        .find_by_email(&query.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cliente não encontrado com email: {}", query.email)))?;

    Ok((StatusCode::OK, Json(cliente)))
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = ClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos ou CPF já cadastrado")
    )
)]
pub async fn create_cliente(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ClientePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// POST /api/clientes/barbearia/{barbeariaId}
#[utoipa::path(
    post,
    path = "/api/clientes/barbearia/{barbeariaId}",
    tag = "Clientes",
    params(("barbeariaId" = i64, Path, description = "ID da barbearia")),
    request_body = ClientePayload,
    responses(
        (status = 201, description = "Cliente criado e vinculado", body = Cliente),
        (status = 400, description = "Dados inválidos, CPF já cadastrado ou barbearia inexistente")
    )
)]
pub async fn create_cliente_with_barbearia(
    State(app_state): State<AppState>,
    WithRejection(Path(barbearia_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ClientePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service
        .create_with_barbearia(payload, barbearia_id)
        .await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = ClientePayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 400, description = "Dados inválidos ou CPF já cadastrado"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_cliente(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ClientePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(cliente)))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_cliente(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cliente_service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
