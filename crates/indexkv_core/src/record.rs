//! Record abstraction.

use crate::error::{CoreError, CoreResult};
use crate::index::ID_FIELD;
use indexkv_codec::FieldValue;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for types stored in an indexed collection.
///
/// Implementors expose their identifier and the values of their indexed
/// fields explicitly. The whole record is stored as CBOR through serde.
///
/// # Example
///
/// ```rust
/// use indexkv_core::{FieldValue, Record};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Post {
///     id: String,
///     slug: String,
///     created: i64,
/// }
///
/// impl Record for Post {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "slug" => Some(self.slug.as_str().into()),
///             "created" => Some(self.created.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned {
    /// Returns the record's identifier. An empty id is rejected on save.
    fn id(&self) -> &str;

    /// Returns the value of the named field, or `None` if it has none.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Returns the value the indexes see for `field`.
///
/// [`ID_FIELD`] always resolves to the record's id.
pub(crate) fn indexed_value<T: Record>(record: &T, field: &str) -> Option<FieldValue> {
    if field == ID_FIELD {
        Some(FieldValue::Text(record.id().to_string()))
    } else {
        record.field(field)
    }
}

/// Serializes a record to CBOR bytes.
pub(crate) fn encode_record<T: Record>(record: &T) -> CoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(record, &mut buf)
        .map_err(|e| CoreError::serialization(format!("encode record: {e}")))?;
    Ok(buf)
}

/// Deserializes a record from CBOR bytes.
pub(crate) fn decode_record<T: Record>(bytes: &[u8]) -> CoreResult<T> {
    ciborium::from_reader(bytes)
        .map_err(|e| CoreError::serialization(format!("decode record: {e}")))
}
