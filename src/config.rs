//! Environment-driven configuration for the aggregator and the search client.
//!
//! Values are read through a [`Lookup`] so tests can supply a map instead of
//! the process environment. Missing variables fall back to their default;
//! malformed ones are an error naming the variable.

use super::*;

pub(crate) type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Clone, Debug)]
pub(crate) struct ServerConfig {
  pub(crate) algolia_api_key: String,
  pub(crate) algolia_app_id: String,
  pub(crate) algolia_host: Option<String>,
  pub(crate) communities_index: String,
  pub(crate) default_limit: usize,
  pub(crate) frontend_origins: Vec<String>,
  pub(crate) index_timeout: Duration,
  pub(crate) max_limit: usize,
  pub(crate) port: u16,
  pub(crate) posts_index: String,
}

impl ServerConfig {
  pub(crate) fn algolia_host(&self) -> String {
    self.algolia_host.clone().unwrap_or_else(|| {
      format!("https://{}-dsn.algolia.net", self.algolia_app_id)
    })
  }

  pub(crate) fn from_env() -> Result<Self> {
    Self::from_lookup(&|key: &str| env::var(key).ok())
  }

  pub(crate) fn from_lookup(lookup: Lookup) -> Result<Self> {
    let index_name = required(lookup, "ALGOLIA_INDEX_NAME")?;

    let default_limit = parse_or(lookup, "SEARCH_DEFAULT_LIMIT", 10)?;
    let max_limit = parse_or(lookup, "SEARCH_MAX_LIMIT", 50)?;

    ensure!(default_limit > 0, "SEARCH_DEFAULT_LIMIT must be positive");
    ensure!(
      max_limit >= default_limit,
      "SEARCH_MAX_LIMIT must be at least SEARCH_DEFAULT_LIMIT"
    );

    Ok(Self {
      algolia_api_key: required(lookup, "ALGOLIA_ADMIN_KEY")?,
      algolia_app_id: required(lookup, "ALGOLIA_APP_ID")?,
      algolia_host: lookup("ALGOLIA_HOST").filter(|host| !host.is_empty()),
      communities_index: lookup("ALGOLIA_COMMUNITIES_INDEX")
        .unwrap_or_else(|| index_name.clone()),
      default_limit,
      frontend_origins: string_or(
        lookup,
        "FRONTEND_URL",
        "http://localhost:5173",
      )
      .split(',')
      .map(str::trim)
      .filter(|origin| !origin.is_empty())
      .map(str::to_string)
      .collect(),
      index_timeout: Duration::from_millis(parse_or(
        lookup,
        "SEARCH_TIMEOUT_MS",
        2000,
      )?),
      max_limit,
      port: parse_or(lookup, "PORT", 3000)?,
      posts_index: lookup("ALGOLIA_POSTS_INDEX").unwrap_or(index_name),
    })
  }
}

#[derive(Clone, Debug)]
pub(crate) struct ClientConfig {
  pub(crate) api_url: String,
  pub(crate) debounce: Duration,
  pub(crate) frontend_url: String,
  pub(crate) limit: usize,
  pub(crate) request_timeout: Duration,
}

impl ClientConfig {
  pub(crate) fn from_env() -> Result<Self> {
    Self::from_lookup(&|key: &str| env::var(key).ok())
  }

  pub(crate) fn from_lookup(lookup: Lookup) -> Result<Self> {
    let limit = parse_or(lookup, "SEARCH_LIMIT", 10)?;

    ensure!(limit > 0, "SEARCH_LIMIT must be positive");

    Ok(Self {
      api_url: string_or(lookup, "SEARCH_API_URL", "http://localhost:3000"),
      debounce: Duration::from_millis(parse_or(
        lookup,
        "SEARCH_DEBOUNCE_MS",
        250,
      )?),
      frontend_url: string_or(lookup, "FRONTEND_URL", "http://localhost:5173")
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string(),
      limit,
      request_timeout: Duration::from_millis(parse_or(
        lookup,
        "SEARCH_REQUEST_TIMEOUT_MS",
        5000,
      )?),
    })
  }
}

fn parse_or<T>(lookup: Lookup, key: &str, default: T) -> Result<T>
where
  T: FromStr + Display,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match lookup(key) {
    Some(value) => value
      .trim()
      .parse()
      .with_context(|| format!("invalid {key} value: {value:?}")),
    None => {
      info!("{key} not set, using default: {default}");
      Ok(default)
    }
  }
}

fn required(lookup: Lookup, key: &str) -> Result<String> {
  lookup(key)
    .filter(|value| !value.trim().is_empty())
    .with_context(|| format!("environment variable {key} must be set"))
}

fn string_or(lookup: Lookup, key: &str, default: &str) -> String {
  lookup(key).unwrap_or_else(|| {
    info!("{key} not set, using default: {default}");
    default.to_string()
  })
}
