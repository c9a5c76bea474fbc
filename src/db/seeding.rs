use tracing::{debug, info};

use super::{Collection, Document, Filter, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(usize),
    Skipped,
}

impl SeedOutcome {
    #[must_use]
    pub const fn inserted(self) -> usize {
        match self {
            Self::Seeded(n) => n,
            Self::Skipped => 0,
        }
    }
}

/// Inserts `defaults` when nothing in `scope` exists yet.
///
/// The count and the insert are separate statements. Two concurrent first
/// calls can both see an empty scope; callers that cannot tolerate that need
/// a unique index to backstop them.
pub async fn seed_if_empty<T: Document>(
    collection: &Collection<T>,
    scope: &Filter,
    defaults: &[T],
) -> Result<SeedOutcome, StoreError> {
    let existing = collection.count(scope).await?;
    if existing > 0 {
        debug!(
            collection = collection.name(),
            existing, "Defaults already present, skipping seed"
        );
        return Ok(SeedOutcome::Skipped);
    }

    let ids = collection.insert_many(defaults).await?;
    info!(
        collection = collection.name(),
        count = ids.len(),
        "Seeded default documents"
    );
    Ok(SeedOutcome::Seeded(ids.len()))
}
