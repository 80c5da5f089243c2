use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::menu::MenuError;
use crate::domain::order::OrderError;
use crate::service::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Restaurant state is unavailable")]
    StatePoisoned,
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        ApiError::Service(e.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::Menu(MenuError::NotFound(_)))
            | ApiError::Service(ServiceError::Order(OrderError::NotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Service(ServiceError::Menu(MenuError::DuplicateId(_)))
            | ApiError::Service(ServiceError::Order(OrderError::NoValidItems))
            | ApiError::Service(ServiceError::Order(OrderError::UnknownFilter(_)))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Persistence(_)) | ApiError::StatePoisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}
