use chrono::{DateTime, Utc};
use mongodb::{
    Collection, IndexModel,
    bson::{self, Binary, Bson, Document, doc, spec::BinarySubtype},
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use uuid::Uuid;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// BSON form of a UUID as the driver stores `Uuid` fields: generic binary
/// holding the 16 raw bytes.
pub fn uuid_bson(id: &Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

/// BSON date for a timestamp, at millisecond precision.
///
/// Pairs with [`bson_datetime`](super::bson_datetime) on stored fields.
pub fn datetime_bson(at: &DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(at.timestamp_millis()))
}

/// `{ "_id": <id> }`
pub fn id_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_bson(&id) }
}

/// Whether `err` came from a unique index rejecting a write.
pub fn is_duplicate_key_error(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Create a named index on `collection` if it does not exist yet.
pub async fn ensure_index<T>(
    collection: &Collection<T>,
    keys: Document,
    name: &str,
    unique: bool,
) -> Result<(), Error>
where
    T: Send + Sync,
{
    let options = IndexOptions::builder()
        .name(name.to_string())
        .unique(unique)
        .build();
    let model = IndexModel::builder().keys(keys).options(options).build();

    collection.create_index(model).await?;
    tracing::debug!(collection = collection.name(), index = name, "Index ensured");
    Ok(())
}
