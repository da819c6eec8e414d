use super::*;

/// Fans a query out to the post and community collections and merges the two
/// ranked groups into one [`SearchResults`].
pub(crate) struct Aggregator<I> {
  index: I,
}

impl<I: SearchIndex> Aggregator<I> {
  async fn lookup<T: DeserializeOwned>(
    &self,
    collection: Collection,
    text: &str,
    limit: usize,
  ) -> Result<Vec<T>, IndexError> {
    let hits = self.index.query(collection, text, limit).await?;

    Ok(normalize(collection, hits, limit))
  }

  pub(crate) fn new(index: I) -> Self {
    Self { index }
  }

  /// Blank queries short-circuit to empty groups without touching the index.
  /// Otherwise both lookups always run to completion, and any failure fails
  /// the whole search.
  pub(crate) async fn search(
    &self,
    query: &str,
    limit: usize,
  ) -> Result<SearchResults, AggregateError> {
    let query = query.trim();

    if query.is_empty() {
      return Ok(SearchResults::default());
    }

    let (posts, communities) = join(
      self.lookup::<PostHit>(Collection::Posts, query, limit),
      self.lookup::<CommunityHit>(Collection::Communities, query, limit),
    )
    .await;

    match (posts, communities) {
      (Ok(posts), Ok(communities)) => Ok(SearchResults { communities, posts }),
      (posts, communities) => {
        let failures = [
          (Collection::Posts, posts.err()),
          (Collection::Communities, communities.err()),
        ]
        .into_iter()
        .filter_map(|(collection, error)| {
          error.map(|error| {
            warn!(%collection, %error, "search index lookup failed");
            (collection, error)
          })
        })
        .collect();

        Err(AggregateError { failures })
      }
    }
  }
}

fn normalize<T: DeserializeOwned>(
  collection: Collection,
  hits: Vec<Value>,
  limit: usize,
) -> Vec<T> {
  hits
    .into_iter()
    .filter_map(|hit| match serde_json::from_value::<T>(hit) {
      Ok(hit) => Some(hit),
      Err(error) => {
        warn!(%collection, %error, "dropping malformed search hit");
        None
      }
    })
    .take(limit)
    .collect()
}
