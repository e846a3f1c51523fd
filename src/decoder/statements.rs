use http::header::CONTENT_TYPE;
use http::HeaderMap;
use tracing::debug;

use crate::decoder::multipart::{self, MultipartPart};
use crate::error::DecodeError;
use crate::models::statements::{Attachment, FinancialStatements, StatementMetadata};

/// Decode a financial statements response.
///
/// The first multipart part is the JSON metadata, every following part is an
/// attachment. Fails as a whole: no attachments are returned when any part is
/// invalid.
pub fn decode_statements(headers: &HeaderMap, raw_body: &[u8]) -> Result<FinancialStatements, DecodeError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or(DecodeError::MissingContentType)?;

    let boundary = multipart::get_boundary(content_type).ok_or_else(|| DecodeError::MissingBoundary {
        content_type: content_type.to_owned(),
    })?;

    let mut parts = multipart::parse(raw_body, &boundary).into_iter();
    let metadata_part = parts.next().ok_or(DecodeError::NoParts)?;
    let metadata_bytes = metadata_part.data.ok_or(DecodeError::MissingMetadata)?;
    let metadata: StatementMetadata =
        serde_json::from_slice(&metadata_bytes).map_err(DecodeError::InvalidMetadata)?;

    let attachments = parts
        .enumerate()
        .map(|(index, part)| to_attachment(index, part))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        business_id = %metadata.business_id,
        documents = metadata.documents.len(),
        attachments = attachments.len(),
        "financial statements decoded"
    );

    Ok(FinancialStatements { metadata, attachments })
}

fn to_attachment(index: usize, part: MultipartPart) -> Result<Attachment, DecodeError> {
    let missing = |field: &'static str| DecodeError::InvalidAttachment { index, missing: field };
    Ok(Attachment {
        filename: part.filename.filter(|f| !f.is_empty()).ok_or_else(|| missing("filename"))?,
        mime_type: part.content_type.ok_or_else(|| missing("type"))?,
        name: part.name.filter(|n| !n.is_empty()).ok_or_else(|| missing("name"))?,
        data: part.data.ok_or_else(|| missing("data"))?,
    })
}
