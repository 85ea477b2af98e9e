//! Content negotiation and the JSON/XML codecs.
//!
//! A [`Responder`] is resolved once per request from the `Content-Type`
//! header and then used for both decoding the body and encoding the
//! response, so a JSON request always gets a JSON answer and an XML request
//! an XML one. The set of formats is closed; there is no plugin surface.

use api_types::expense::{ExpenseList, ExpenseView};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Malformed request body for the negotiated format.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("body is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// A response value could not be encoded. Unlike [`ParseError`] this is a
/// server-side fault.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML encoding failed: {0}")]
    Xml(#[from] quick_xml::SeError),
}

/// One serialization strategy, keyed by its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Responder {
    Json,
    Xml,
}

impl Responder {
    /// Map a `Content-Type` value to a strategy.
    ///
    /// The match is exact: media-type parameters are not stripped, and
    /// anything unknown is `None`, which the handlers answer with 406
    /// before touching the ledger.
    pub fn resolve(content_type: &str) -> Option<Self> {
        match content_type {
            "application/json" => Some(Self::Json),
            "application/xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// The value for the response `Content-Type` header.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    pub fn deserialize<T: DeserializeOwned>(self, body: &[u8]) -> Result<T, ParseError> {
        match self {
            Self::Json => Ok(serde_json::from_slice(body)?),
            Self::Xml => Ok(quick_xml::de::from_str(std::str::from_utf8(body)?)?),
        }
    }

    pub fn serialize<T: Serialize>(self, value: &T) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::Json => Ok(serde_json::to_vec(value)?),
            Self::Xml => Ok(quick_xml::se::to_string(value)?.into_bytes()),
        }
    }

    /// Encode a list response.
    ///
    /// JSON stays a bare array; XML needs a single document root, so the
    /// list goes inside an `<expenses>` envelope. This is the only point
    /// where the two formats differ in shape.
    pub fn serialize_list(self, expenses: Vec<ExpenseView>) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::Json => Ok(serde_json::to_vec(&expenses)?),
            Self::Xml => {
                let envelope = ExpenseList { expenses };
                Ok(quick_xml::se::to_string(&envelope)?.into_bytes())
            }
        }
    }
}
