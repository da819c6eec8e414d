use super::*;

/// Two independently ranked groups, rendered in separate sections.
///
/// Both arrays are always serialized. Decoding tolerates a missing array so a
/// sparse response still yields empty groups.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct SearchResults {
  #[serde(default)]
  pub(crate) communities: Vec<CommunityHit>,
  #[serde(default)]
  pub(crate) posts: Vec<PostHit>,
}

impl SearchResults {
  pub(crate) fn is_empty(&self) -> bool {
    self.communities.is_empty() && self.posts.is_empty()
  }

  pub(crate) fn len(&self) -> usize {
    self.communities.len() + self.posts.len()
  }
}
