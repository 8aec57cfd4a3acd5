/// Configuration errors. These abort the layout pass and are never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("column count must be at least 1")]
    InvalidColumns,
    #[error("item at index {index} has no identity key")]
    MissingKey { index: usize },
    #[error("item at index {index} reuses the identity key of item {first}")]
    DuplicateKey { index: usize, first: usize },
}
