use super::*;

/// HTTP client for the aggregator's `/search` endpoint.
#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.request_timeout)
      .build()
      .context("could not build search client")?;

    Ok(Self {
      base_url: config.api_url.trim_end_matches('/').to_string(),
      client,
    })
  }
}

impl SearchSource for Client {
  async fn search(&self, query: &str, limit: usize) -> Result<SearchResults> {
    if query.trim().is_empty() {
      return Ok(SearchResults::default());
    }

    let limit = limit.to_string();

    let response = self
      .client
      .get(format!("{}/search", self.base_url))
      .query(&[("q", query), ("limit", limit.as_str())])
      .send()
      .await
      .context("could not reach search service")?;

    let status = response.status();

    if !status.is_success() {
      return Err(match response.json::<ErrorBody>().await {
        Ok(body) => {
          anyhow!("search service returned {status}: {}", body.error)
        }
        Err(_) => anyhow!("search service returned {status}"),
      });
    }

    response
      .json::<SearchResults>()
      .await
      .context("could not decode search results")
  }
}
