//! Uploaded document types and the `doc_<i>` identifier convention

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prefix of the synthetic document identifiers
pub const DOCUMENT_ID_PREFIX: &str = "doc";

/// Synthetic identifier for the upload at position `index`
pub fn document_id(index: usize) -> String {
    format!("{}_{}", DOCUMENT_ID_PREFIX, index)
}

/// Recover the upload position from an identifier.
///
/// Only the text after the last `_` is considered, so `doc_3` and
/// `anything_3` both resolve to `3`.
pub fn parse_document_index(id: &str) -> Result<usize> {
    let (_, tail) = id
        .rsplit_once('_')
        .ok_or_else(|| Error::citation(format!("malformed document id '{}'", id)))?;

    tail.parse::<usize>()
        .map_err(|_| Error::citation(format!("malformed document id '{}'", id)))
}

/// A raw upload as received from the form
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original filename
    pub filename: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Decode the bytes as UTF-8 text
    pub fn decode(self) -> Result<String> {
        let Upload { filename, data } = self;
        String::from_utf8(data).map_err(|e| Error::file_parse(filename, e.to_string()))
    }
}

/// A decoded upload with its synthetic identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedDocument {
    /// Synthetic identifier (`doc_<i>`)
    pub id: String,
    /// Original filename
    pub filename: String,
    /// Decoded text
    pub text: String,
}

impl UploadedDocument {
    /// Decode a list of uploads, assigning identifiers by upload order
    pub fn from_uploads(uploads: Vec<Upload>) -> Result<Vec<Self>> {
        uploads
            .into_iter()
            .enumerate()
            .map(|(index, upload)| {
                let filename = upload.filename.clone();
                Ok(Self {
                    id: document_id(index),
                    filename,
                    text: upload.decode()?,
                })
            })
            .collect()
    }

    /// Build documents directly from text, in order
    pub fn from_texts<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self {
                id: document_id(index),
                filename: format!("{}.txt", document_id(index)),
                text: text.into(),
            })
            .collect()
    }
}
