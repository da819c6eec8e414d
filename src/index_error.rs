use super::*;

#[derive(Debug, Error)]
pub(crate) enum IndexError {
  #[error("request to search index failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("search index responded with {status}: {message}")]
  Status { message: String, status: StatusCode },
}

/// Every lookup that failed during a single fan-out, in request order.
#[derive(Debug, Error)]
#[error("search index lookup failed for {}", join_labels(.failures))]
pub(crate) struct AggregateError {
  pub(crate) failures: Vec<(Collection, IndexError)>,
}

impl AggregateError {
  pub(crate) fn collections(&self) -> Vec<Collection> {
    self
      .failures
      .iter()
      .map(|(collection, _)| *collection)
      .collect()
  }
}

fn join_labels(failures: &[(Collection, IndexError)]) -> String {
  failures
    .iter()
    .map(|(collection, _)| collection.label())
    .collect::<Vec<_>>()
    .join(", ")
}
