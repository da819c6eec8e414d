use super::*;

#[derive(Debug, Deserialize)]
struct QueryResponse {
  hits: Vec<Value>,
}

/// Algolia REST client. Posts and communities share one index by default and
/// are told apart by their `type` attribute.
#[derive(Clone)]
pub(crate) struct AlgoliaIndex {
  api_key: String,
  app_id: String,
  client: reqwest::Client,
  communities_index: String,
  host: String,
  posts_index: String,
}

impl AlgoliaIndex {
  const API_KEY_HEADER: &str = "X-Algolia-API-Key";

  const APP_ID_HEADER: &str = "X-Algolia-Application-Id";

  fn index_name(&self, collection: Collection) -> &str {
    match collection {
      Collection::Communities => &self.communities_index,
      Collection::Posts => &self.posts_index,
    }
  }

  pub(crate) fn new(config: &ServerConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.index_timeout)
      .build()
      .context("could not build search index client")?;

    Ok(Self {
      api_key: config.algolia_api_key.clone(),
      app_id: config.algolia_app_id.clone(),
      client,
      communities_index: config.communities_index.clone(),
      host: config.algolia_host().trim_end_matches('/').to_string(),
      posts_index: config.posts_index.clone(),
    })
  }
}

impl SearchIndex for AlgoliaIndex {
  async fn query(
    &self,
    collection: Collection,
    text: &str,
    limit: usize,
  ) -> Result<Vec<Value>, IndexError> {
    let url = format!(
      "{}/1/indexes/{}/query",
      self.host,
      self.index_name(collection)
    );

    debug!(%collection, limit, "querying search index");

    let response = self
      .client
      .post(url)
      .header(Self::APP_ID_HEADER, &self.app_id)
      .header(Self::API_KEY_HEADER, &self.api_key)
      .json(&json!({
        "filters": collection.filter(),
        "hitsPerPage": limit,
        "query": text,
      }))
      .send()
      .await?;

    let status = response.status();

    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(IndexError::Status { message, status });
    }

    Ok(response.json::<QueryResponse>().await?.hits)
  }
}
