//! Citation resolution against the uploaded documents

use crate::error::{Error, Result};
use crate::types::chat::ChatCitation;
use crate::types::document::{parse_document_index, UploadedDocument};
use crate::types::response::ResolvedCitation;

/// Resolve every (citation, document id) pair to the referenced upload.
///
/// Output order follows the API: citations in order, ids in order within each
/// citation. Any id that is malformed or outside the uploaded range fails the
/// whole resolution.
pub fn resolve_citations(
    citations: &[ChatCitation],
    documents: &[UploadedDocument],
) -> Result<Vec<ResolvedCitation>> {
    let mut resolved = Vec::new();

    for citation in citations {
        for doc_id in &citation.document_ids {
            let index = parse_document_index(doc_id)?;
            let document = documents.get(index).ok_or_else(|| {
                Error::citation(format!(
                    "document id '{}' refers to index {} but only {} document(s) were uploaded",
                    doc_id,
                    index,
                    documents.len()
                ))
            })?;

            resolved.push(ResolvedCitation {
                text: citation.text.clone(),
                document_id: doc_id.clone(),
                document_index: index,
                filename: document.filename.clone(),
                source: document.text.clone(),
            });
        }
    }

    Ok(resolved)
}
