use crate::db::{Collection, Document, Filter};
use crate::domain::{DocumentId, DomainError};

/// Fails with [`DomainError::DuplicateValue`] if another document in
/// `collection` already has `value` in `field`.
///
/// This is an early, friendly answer only. Two callers can both pass the
/// check; the unique index on the field rejects the second write.
pub async fn check_unique<T: Document>(
    collection: &Collection<T>,
    field: &str,
    value: &str,
    exclude: Option<DocumentId>,
) -> Result<(), DomainError> {
    let mut filter = Filter::new().eq(field, value);
    if let Some(id) = exclude {
        filter = filter.excluding(id);
    }

    if collection.count(&filter).await? > 0 {
        return Err(DomainError::duplicate(field));
    }

    Ok(())
}
