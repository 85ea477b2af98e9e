use axum::{http::StatusCode, response::IntoResponse};

pub use responder::{EncodeError, ParseError, Responder};
pub use server::{ServerState, router, run, run_with_listener};

mod expenses;
mod responder;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{
            ErrorResponse, ExpenseCreated, ExpenseList, ExpenseNew, ExpenseView,
        };
        pub use ledger::RecordResult;
    }
}

/// Request failures that end without a negotiated body.
///
/// Everything that can be reported in the client's format (validation,
/// parse errors, store failures) is answered inline by the handlers; only
/// failed negotiation and failed encoding fall through to here.
pub enum ServerError {
    /// Missing or unsupported `Content-Type`.
    Negotiation,
    /// A response value could not be encoded in the negotiated format.
    Encode(EncodeError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Negotiation => StatusCode::NOT_ACCEPTABLE.into_response(),
            ServerError::Encode(err) => {
                tracing::error!("response encoding failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<EncodeError> for ServerError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}
