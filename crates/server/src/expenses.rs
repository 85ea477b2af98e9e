//! Expenses API endpoints

use api_types::expense::{ErrorResponse, ExpenseCreated, ExpenseNew, ExpenseView};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use ledger::{Expense, NewExpense, RecordResult};

use crate::{Responder, ServerError, server::ServerState};

/// Pick the serialization strategy for this request.
///
/// Negotiation is keyed off `Content-Type` only, for both the read and
/// write paths; `Accept` never participates. No resolution means 406
/// before anything else happens.
fn negotiate(headers: &HeaderMap) -> Result<Responder, ServerError> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(Responder::resolve)
        .ok_or(ServerError::Negotiation)
}

/// Build a response in the negotiated format.
fn reply<T: serde::Serialize>(
    responder: Responder,
    status: StatusCode,
    value: &T,
) -> Result<Response, ServerError> {
    let body = responder.serialize(value)?;
    Ok(response_with(responder, status, body))
}

fn response_with(responder: Responder, status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, responder.content_type())],
        body,
    )
        .into_response()
}

fn map_expense(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        payee: expense.payee,
        amount: expense.amount,
        date: expense.date,
    }
}

/// Handle `POST /expenses`.
pub async fn record(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    let responder = negotiate(&headers)?;

    let payload: ExpenseNew = match responder.deserialize(&body) {
        Ok(payload) => payload,
        Err(err) => {
            // Malformed bodies never reach the ledger.
            return reply(
                responder,
                StatusCode::BAD_REQUEST,
                &ErrorResponse {
                    error: err.to_string(),
                },
            );
        }
    };

    let draft = NewExpense {
        payee: payload.payee,
        amount: payload.amount,
        date: payload.date,
    };

    match state.ledger.record(&draft).await {
        Ok(RecordResult::Recorded { expense_id }) => {
            reply(responder, StatusCode::OK, &ExpenseCreated { expense_id })
        }
        Ok(RecordResult::Rejected { error }) => reply(
            responder,
            StatusCode::UNPROCESSABLE_ENTITY,
            &ErrorResponse { error },
        ),
        Err(err) => {
            tracing::error!("database error: {err}");
            reply(
                responder,
                StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorResponse {
                    error: "internal server error".to_string(),
                },
            )
        }
    }
}

/// Handle `GET /expenses/{date}`.
///
/// The path segment is passed to the ledger verbatim; an unparseable date
/// is not an error, it just matches nothing.
pub async fn on_date(
    State(state): State<ServerState>,
    Path(date): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let responder = negotiate(&headers)?;

    match state.ledger.expenses_on(&date).await {
        Ok(expenses) => {
            let views = expenses.into_iter().map(map_expense).collect();
            let body = responder.serialize_list(views)?;
            Ok(response_with(responder, StatusCode::OK, body))
        }
        Err(err) => {
            tracing::error!("database error: {err}");
            reply(
                responder,
                StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorResponse {
                    error: "internal server error".to_string(),
                },
            )
        }
    }
}
