use super::*;

/// Where a [`SearchBox`] sends settled queries.
pub(crate) trait SearchSource: Clone + Send + Sync + 'static {
  fn search(
    &self,
    query: &str,
    limit: usize,
  ) -> impl Future<Output = Result<SearchResults>> + Send;
}
