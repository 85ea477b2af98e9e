//! The module contains the error the ledger can throw.
use sea_orm::DbErr;
use thiserror::Error;

/// Ledger custom errors.
///
/// Validation failure is not an error: a rejected expense comes back as
/// [`RecordResult::Rejected`]. Only store failures land here.
///
/// [`RecordResult::Rejected`]: super::RecordResult::Rejected
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Database(#[from] DbErr),
}
