//! The module contains the `Expense` structs and their database entity.

use sea_orm::entity::prelude::*;

/// A stored expense.
///
/// Built from a [`NewExpense`] once validation passed and the row was
/// written. `id` is assigned by the store at insertion time and the record
/// is immutable afterwards: no update path exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub payee: String,
    pub amount: f64,
    /// ISO-8601 calendar date (`YYYY-MM-DD`), kept verbatim as submitted.
    pub date: String,
}

/// An expense draft under validation, not yet persisted.
///
/// Every field is optional because presence is exactly what the ledger
/// validates; it has no identifier until it becomes an [`Expense`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewExpense {
    pub payee: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub payee: String,
    pub amount: f64,
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            payee: model.payee,
            amount: model.amount,
            date: model.date,
        }
    }
}
