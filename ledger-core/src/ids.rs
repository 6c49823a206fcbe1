/// A source of fresh, opaque, process-wide unique identifiers.
///
/// Implementations must be callable concurrently and must never hand out the
/// same value twice within one process. Any `Fn() -> String + Send + Sync`
/// closure qualifies.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

impl<F> IdSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}
