use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommunityHit {
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) display_name: Option<String>,
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) icon_url: Option<String>,
  #[serde(rename = "objectID")]
  pub(crate) object_id: String,
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) slug: Option<String>,
}

impl CommunityHit {
  /// Routing key: the slug when the index has one, otherwise `objectID`.
  pub(crate) fn route_key(&self) -> &str {
    self
      .slug
      .as_deref()
      .filter(|slug| !slug.is_empty())
      .unwrap_or(&self.object_id)
  }
}
