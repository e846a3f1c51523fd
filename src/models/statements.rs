use serde::{Deserialize, Serialize};

use crate::models::periods::FinancialPeriod;
use crate::models::register::Register;

/// Decoded `GET /ttfs/1.0.0/financialStatements` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialStatements {
    pub metadata: StatementMetadata,
    /// In multipart body order.
    pub attachments: Vec<Attachment>,
}

/// JSON metadata part of the statements response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementMetadata {
    pub business_id: String,
    pub register: Register,
    pub company_name: String,
    pub period: FinancialPeriod,
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub record_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_date: Option<String>,
}

/// One binary part of the statements response.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Form field name of the part.
    pub name: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("name", &self.name)
            .field("data_len", &self.data.len())
            .finish()
    }
}
