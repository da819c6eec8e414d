use super::*;

/// Query-by-text over one logical collection of an external search index.
///
/// Implementations return raw hit records in relevance order; shape
/// normalization happens in [`Aggregator`].
pub(crate) trait SearchIndex: Send + Sync + 'static {
  fn query(
    &self,
    collection: Collection,
    text: &str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Value>, IndexError>> + Send;
}
