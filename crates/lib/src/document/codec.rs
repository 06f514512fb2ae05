//! Byte-level encodings of [`Document`]s.

use std::path::Path;

use super::{CodecError, Document, PlistValue, decode_top_level};
use crate::{Error, Result};

/// Converts between bytes and documents.
///
/// Implementations own the on-disk format entirely; nothing else in the crate
/// knows whether a project file is JSON, XML or binary.
pub trait PlistCodec {
    /// Parses `bytes` into a document.
    fn decode(&self, bytes: &[u8]) -> Result<Document>;

    /// Serializes `document`.
    fn encode(&self, document: &Document) -> Result<Vec<u8>>;

    /// Reads and decodes a file.
    fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Document>
    where
        Self: Sized,
    {
        let bytes =
            std::fs::read(path).map_err(|source| -> Error { CodecError::Io { source }.into() })?;
        self.decode(&bytes)
    }

    /// Encodes a document and writes it to a file.
    fn write_file<P: AsRef<Path>>(&self, path: P, document: &Document) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = self.encode(document)?;
        std::fs::write(path, bytes).map_err(|source| -> Error { CodecError::Io { source }.into() })
    }
}

/// The JSON form of a project file, which Xcode reads as well as the
/// old-style property list.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl PlistCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let decode_error = |source| -> Error { CodecError::Decode { source }.into() };
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let (value, repeated) = decode_top_level(&mut deserializer).map_err(decode_error)?;
        deserializer.end().map_err(decode_error)?;
        match value {
            PlistValue::Dictionary(entries) => {
                Ok(Document::from_entries(entries).with_repeated_objects(repeated))
            }
            other => Err(CodecError::InvalidShape {
                reason: format!("top level is a {}, expected a dictionary", other.type_name()),
            }
            .into()),
        }
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        };
        encoded.map_err(|source| CodecError::Encode { source }.into())
    }
}
