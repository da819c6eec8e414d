use super::*;

/// One selectable row of the results popover.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResultEntry {
  pub(crate) collection: Collection,
  pub(crate) detail: Option<String>,
  pub(crate) icon_url: Option<String>,
  pub(crate) id: String,
  pub(crate) route: String,
  pub(crate) title: String,
}

impl From<&CommunityHit> for ResultEntry {
  fn from(hit: &CommunityHit) -> Self {
    let label = hit
      .display_name
      .as_deref()
      .or(hit.slug.as_deref())
      .unwrap_or("community");

    Self {
      collection: Collection::Communities,
      detail: hit.slug.clone(),
      icon_url: hit.icon_url.clone(),
      id: hit.object_id.clone(),
      route: format!("/r/{}", hit.route_key()),
      title: format!("@{label}"),
    }
  }
}

impl From<&PostHit> for ResultEntry {
  fn from(hit: &PostHit) -> Self {
    let detail = hit
      .content
      .as_deref()
      .map(plain_snippet)
      .filter(|text| !text.is_empty())
      .map(|text| truncate(&text, POST_SNIPPET_CHARS));

    Self {
      collection: Collection::Posts,
      detail,
      icon_url: None,
      id: hit.object_id.clone(),
      route: format!("/post/{}/comments", hit.object_id),
      title: hit.title.clone().unwrap_or_else(|| "(untitled)".to_string()),
    }
  }
}

impl ResultEntry {
  pub(crate) fn url(&self, frontend_url: &str) -> String {
    format!("{}{}", frontend_url.trim_end_matches('/'), self.route)
  }
}
