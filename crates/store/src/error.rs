/// Error surfaced by a document-store backend.
///
/// Lookup misses are represented as `Ok(None)` by the store methods
/// themselves; this type only carries genuine backend failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
