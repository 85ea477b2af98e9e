use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for recording an expense.
    ///
    /// Every field is optional on the wire: presence is checked by the
    /// ledger, which names each missing field in its rejection message.
    /// Unknown keys are accepted and ignored.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename = "expense")]
    pub struct ExpenseNew {
        pub payee: Option<String>,
        pub amount: Option<f64>,
        pub date: Option<String>,
    }

    /// A stored expense as returned by date queries.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename = "expense")]
    pub struct ExpenseView {
        pub id: i64,
        pub payee: String,
        pub amount: f64,
        /// ISO-8601 calendar date (`YYYY-MM-DD`), stored verbatim.
        pub date: String,
    }

    /// Success body for a record call.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename = "response")]
    pub struct ExpenseCreated {
        pub expense_id: i64,
    }

    /// Error body for rejected or failed requests.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename = "response")]
    pub struct ErrorResponse {
        pub error: String,
    }

    /// Envelope for XML list responses.
    ///
    /// An XML document needs a single root element, so date queries answer
    /// with `<expenses>` wrapping repeated `<expense>` items. JSON list
    /// responses stay a bare array and never use this type.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename = "expenses")]
    pub struct ExpenseList {
        #[serde(rename = "expense", default)]
        pub expenses: Vec<ExpenseView>,
    }
}
