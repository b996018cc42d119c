// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::lifecycle_use_case::LifecycleError;
use crate::domain::models::work_item::DomainError;
use crate::domain::repositories::board_repository::RepositoryError;
use crate::domain::services::forecasting_service::ForecastError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，按错误类型映射 HTTP 状态码
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(e) = self.0.downcast_ref::<ForecastError>() {
            return match e {
                ForecastError::BoardNotFound(_) | ForecastError::WorkItemNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                ForecastError::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ForecastError::Repository(e) => repository_status(e),
            };
        }
        if let Some(e) = self.0.downcast_ref::<LifecycleError>() {
            return match e {
                LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
                LifecycleError::Domain(e) => domain_status(e),
                LifecycleError::Repository(e) => repository_status(e),
            };
        }
        if let Some(e) = self.0.downcast_ref::<DomainError>() {
            return domain_status(e);
        }
        if let Some(e) = self.0.downcast_ref::<RepositoryError>() {
            return repository_status(e);
        }
        if self.0.downcast_ref::<validator::ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn domain_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
        DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
    }
}

fn repository_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
