use super::*;

/// What the results popover shows for the current search box state.
#[derive(Debug, PartialEq)]
pub(crate) enum Popover {
  Empty,
  Failed(String),
  Hidden,
  Loading,
  Results {
    communities: Vec<ResultEntry>,
    posts: Vec<ResultEntry>,
  },
}

impl Popover {
  /// Selectable entries in display order: communities, then posts.
  pub(crate) fn into_entries(self) -> Vec<ResultEntry> {
    match self {
      Popover::Results { communities, posts } => {
        communities.into_iter().chain(posts).collect()
      }
      _ => Vec::new(),
    }
  }
}
