use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostHit {
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) community_slug: Option<String>,
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) content: Option<String>,
  #[serde(rename = "objectID")]
  pub(crate) object_id: String,
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) title: Option<String>,
  #[serde(
    default,
    deserialize_with = "deserialize_optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub(crate) username: Option<String>,
}
