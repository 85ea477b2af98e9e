//! Validation and persistence of expense records.
//!
//! The [`Ledger`] owns the `expenses` table: [`Ledger::record`] checks that
//! the required fields are present and inserts the row, and
//! [`Ledger::expenses_on`] answers date lookups. An expense is persisted if
//! and only if all three required fields are present; no partial record ever
//! reaches the store.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

pub use error::LedgerError;
pub use expenses::{Expense, NewExpense};

mod error;
mod expenses;

type ResultLedger<T> = Result<T, LedgerError>;

/// Required fields of an expense, in the order their absence is reported.
const REQUIRED_FIELDS: [&str; 3] = ["payee", "amount", "date"];

/// Outcome of a record attempt.
///
/// A rejection is a value, not an error: [`LedgerError`] is reserved for
/// store failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordResult {
    Recorded { expense_id: i64 },
    Rejected { error: String },
}

#[derive(Debug, Clone)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Validate `expense` and, if complete, persist it.
    ///
    /// The returned id comes from the insert itself (the store's
    /// auto-increment primary key), so two concurrent writers can never
    /// observe each other's id. Nothing is written when validation fails.
    pub async fn record(&self, expense: &NewExpense) -> ResultLedger<RecordResult> {
        let (Some(payee), Some(amount), Some(date)) =
            (&expense.payee, expense.amount, &expense.date)
        else {
            return Ok(RecordResult::Rejected {
                error: rejection_message(&missing_fields(expense)),
            });
        };

        let draft = expenses::ActiveModel {
            id: ActiveValue::NotSet,
            payee: ActiveValue::Set(payee.clone()),
            amount: ActiveValue::Set(amount),
            date: ActiveValue::Set(date.clone()),
        };
        let stored = draft.insert(&self.database).await?;

        Ok(RecordResult::Recorded {
            expense_id: stored.id,
        })
    }

    /// Every stored expense whose `date` column equals `date`.
    ///
    /// The comparison is verbatim string equality: nothing at this layer
    /// parses the date, so a malformed date simply matches no rows. An
    /// empty result is an empty vector, never an error.
    pub async fn expenses_on(&self, date: &str) -> ResultLedger<Vec<Expense>> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::Date.eq(date))
            .all(&self.database)
            .await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }
}

/// Names of the required fields absent from `expense`, in reporting order.
///
/// Computed fresh on every call; the ledger keeps no validation state
/// between record attempts.
fn missing_fields(expense: &NewExpense) -> Vec<&'static str> {
    let present = [
        expense.payee.is_some(),
        expense.amount.is_some(),
        expense.date.is_some(),
    ];

    REQUIRED_FIELDS
        .into_iter()
        .zip(present)
        .filter_map(|(field, present)| (!present).then_some(field))
        .collect()
}

fn rejection_message(missing: &[&str]) -> String {
    let clauses = missing
        .iter()
        .map(|field| format!("`{field}` is required"))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Invalid expense: {clauses}")
}
