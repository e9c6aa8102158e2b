use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use storefront_engine::{CustomerApiError, PaymentGatewayError};
use thiserror::Error;

use crate::data_objects::JsonResponse;

const GENERIC_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The request conflicts with the current state of the order. {0}")]
    Conflict(String),
    #[error("The payment provider could not be reached. {0}")]
    UpstreamError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ServerError {
    /// The message that is sent back to the caller. Server-side failures never reveal their details.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequestBody(msg) => msg.clone(),
            Self::InvalidSignature => "Invalid signature".into(),
            Self::NoRecordFound(msg) => msg.clone(),
            Self::Conflict(msg) => msg.clone(),
            Self::UpstreamError(_) => "Order failed".into(),
            Self::InitializeError(_) | Self::BackendError(_) | Self::IOError(_) | Self::Unspecified(_) => {
                GENERIC_SERVER_ERROR.into()
            },
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidSignature => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(JsonResponse::failure(self.public_message()))
    }
}

impl From<PaymentGatewayError> for ServerError {
    fn from(e: PaymentGatewayError) -> Self {
        match e {
            PaymentGatewayError::ValidationError(msg) => Self::InvalidRequestBody(msg),
            PaymentGatewayError::InvalidSignature => Self::InvalidSignature,
            PaymentGatewayError::OrderNotFound(_) => Self::NoRecordFound("Order not found".into()),
            PaymentGatewayError::OrderModificationForbidden => {
                Self::Conflict("The order cannot accept this payment in its current state".into())
            },
            PaymentGatewayError::PaymentAlreadyExists(_) => {
                Self::Conflict("The payment has already been applied to another order".into())
            },
            PaymentGatewayError::UpstreamGatewayError(msg) => Self::UpstreamError(msg),
            PaymentGatewayError::OrderAlreadyExists(id) => {
                Self::BackendError(format!("The payment provider issued a duplicate order id, {id}"))
            },
            PaymentGatewayError::DatabaseError(msg) => Self::BackendError(format!("Database error: {msg}")),
        }
    }
}

impl From<CustomerApiError> for ServerError {
    fn from(e: CustomerApiError) -> Self {
        match e {
            CustomerApiError::ValidationError(e) => Self::InvalidRequestBody(e.to_string()),
            CustomerApiError::DatabaseError(msg) => Self::BackendError(format!("Database error: {msg}")),
        }
    }
}
