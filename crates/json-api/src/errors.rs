//! HTTP error responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with a status
//! chosen from the domain error that caused it.

use salvo::{
    Response,
    http::StatusCode,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    writing::{Json, Scribe},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use storefront_app::domain::{
    orders::OrdersServiceError, products::ProductsServiceError, stats::StatsServiceError,
    users::UsersServiceError,
};

const RETRY_MESSAGE: &str = "The store is busy, please retry";
const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable description of what went wrong
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    pub(crate) fn retry() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, RETRY_MESSAGE)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            error: self.message,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::FORBIDDEN, "Forbidden"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}

impl From<OrdersServiceError> for ApiError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::UnsupportedPaymentMethod
            | OrdersServiceError::EmptyCart
            | OrdersServiceError::InvalidCartLine
            | OrdersServiceError::MissingAddress
            | OrdersServiceError::InvalidStatus(_)
            | OrdersServiceError::InsufficientStock { .. } => Self::bad_request(error.to_string()),
            OrdersServiceError::IncompleteIdentity => Self::unauthorized(error.to_string()),
            OrdersServiceError::UnknownProduct(_) | OrdersServiceError::NotFound => {
                Self::not_found(error.to_string())
            }
            OrdersServiceError::InvalidData => {
                warn!("order data rejected by the database");

                Self::bad_request("Invalid order data")
            }
            OrdersServiceError::Sql(ref source) if error.is_transient() => {
                warn!("transient storage failure in orders: {source}");

                Self::retry()
            }
            OrdersServiceError::Sql(source) => {
                error!("orders storage failure: {source}");

                Self::internal_server_error()
            }
        }
    }
}

impl From<ProductsServiceError> for ApiError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::not_found("Product not found"),
            ProductsServiceError::InvalidData => {
                error!("product row failed validation");

                Self::internal_server_error()
            }
            ProductsServiceError::Sql(source) => {
                error!("products storage failure: {source}");

                Self::internal_server_error()
            }
        }
    }
}

impl From<UsersServiceError> for ApiError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::NotFound => Self::not_found("User not found"),
            UsersServiceError::IncompleteIdentity => Self::unauthorized(error.to_string()),
            UsersServiceError::MissingRequiredData => Self::bad_request(error.to_string()),
            UsersServiceError::Sql(source) => {
                error!("users storage failure: {source}");

                Self::internal_server_error()
            }
        }
    }
}

impl From<StatsServiceError> for ApiError {
    fn from(error: StatsServiceError) -> Self {
        let StatsServiceError::Sql(source) = error;

        error!("stats storage failure: {source}");

        Self::internal_server_error()
    }
}
