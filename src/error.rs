use thiserror::Error;

/// Errors returned by [`Cursor`](crate::Cursor) operations.
///
/// Set operations themselves never fail; they report outcomes as `bool`
/// or [`Lookup`](crate::Lookup) values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor was created at a different generation than the set it is
    /// used with: the set was modified since, or it is a different set.
    #[error("Stale cursor: created at generation {created}, set is now at generation {current}")]
    StaleCursor { created: u64, current: u64 },
}

/// A `Result` with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
