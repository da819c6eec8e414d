use super::*;

/// A logical partition of the search index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Collection {
  Communities,
  Posts,
}

impl Collection {
  /// Attribute filter selecting this collection's records.
  pub(crate) fn filter(self) -> String {
    format!("type:{}", self.record_type())
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Collection::Communities => "communities",
      Collection::Posts => "posts",
    }
  }

  pub(crate) fn record_type(self) -> &'static str {
    match self {
      Collection::Communities => "community",
      Collection::Posts => "post",
    }
  }
}

impl Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
