//! Fakes shared by the unit tests: an in-memory [`SearchIndex`], an in-process
//! Algolia-compatible HTTP server, and a scripted [`SearchSource`].

use {
  super::*,
  axum::{extract::Path, http::HeaderMap, routing::post},
  std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
  },
};

#[derive(Clone, Default)]
pub(crate) struct SpyIndex {
  state: Arc<Mutex<SpyState>>,
}

#[derive(Default)]
struct SpyState {
  calls: Vec<(Collection, String, usize)>,
  communities: Vec<Value>,
  failing: Vec<Collection>,
  posts: Vec<Value>,
}

impl SpyIndex {
  pub(crate) fn calls(&self) -> Vec<(Collection, String, usize)> {
    self.state.lock().unwrap().calls.clone()
  }

  pub(crate) fn fail(&self, collection: Collection) {
    self.state.lock().unwrap().failing.push(collection);
  }

  pub(crate) fn new(posts: Vec<Value>, communities: Vec<Value>) -> Self {
    Self {
      state: Arc::new(Mutex::new(SpyState {
        communities,
        posts,
        ..SpyState::default()
      })),
    }
  }
}

impl SearchIndex for SpyIndex {
  async fn query(
    &self,
    collection: Collection,
    text: &str,
    limit: usize,
  ) -> Result<Vec<Value>, IndexError> {
    let mut state = self.state.lock().unwrap();

    state.calls.push((collection, text.to_string(), limit));

    if state.failing.contains(&collection) {
      return Err(IndexError::Status {
        message: "unavailable".into(),
        status: StatusCode::SERVICE_UNAVAILABLE,
      });
    }

    Ok(match collection {
      Collection::Communities => state.communities.clone(),
      Collection::Posts => state.posts.clone(),
    })
  }
}

/// One request received by [`FakeAlgolia`].
#[derive(Clone, Debug)]
pub(crate) struct AlgoliaCall {
  pub(crate) api_key: Option<String>,
  pub(crate) app_id: Option<String>,
  pub(crate) filters: String,
  pub(crate) hits_per_page: usize,
  pub(crate) index: String,
  pub(crate) query: String,
}

#[derive(Default)]
struct AlgoliaState {
  calls: Vec<AlgoliaCall>,
  delay: Duration,
  failing: Vec<String>,
  ignore_page_size: bool,
  records: Vec<Value>,
}

/// Minimal Algolia query endpoint on a random local port. Records are matched
/// by their `type` attribute and a case-insensitive substring search over
/// their string fields.
pub(crate) struct FakeAlgolia {
  addr: SocketAddr,
  state: Arc<Mutex<AlgoliaState>>,
}

impl FakeAlgolia {
  fn add(&self, record_type: &str, mut record: Value) {
    record["type"] = json!(record_type);
    self.state.lock().unwrap().records.push(record);
  }

  pub(crate) fn add_community(&self, record: Value) {
    self.add(Collection::Communities.record_type(), record);
  }

  pub(crate) fn add_post(&self, record: Value) {
    self.add(Collection::Posts.record_type(), record);
  }

  pub(crate) fn calls(&self) -> Vec<AlgoliaCall> {
    self.state.lock().unwrap().calls.clone()
  }

  pub(crate) fn delay(&self, delay: Duration) {
    self.state.lock().unwrap().delay = delay;
  }

  pub(crate) fn fail(&self, collection: Collection) {
    self.state.lock().unwrap().failing.push(collection.filter());
  }

  pub(crate) fn ignore_page_size(&self) {
    self.state.lock().unwrap().ignore_page_size = true;
  }

  async fn query(
    State(state): State<Arc<Mutex<AlgoliaState>>>,
    Path(index): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
  ) -> Response {
    let header = |name: &str| {
      headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
    };

    let call = AlgoliaCall {
      api_key: header("x-algolia-api-key"),
      app_id: header("x-algolia-application-id"),
      filters: body["filters"].as_str().unwrap_or_default().to_string(),
      hits_per_page: body["hitsPerPage"]
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(20),
      index,
      query: body["query"].as_str().unwrap_or_default().to_string(),
    };

    let (delay, outcome) = {
      let mut state = state.lock().unwrap();

      state.calls.push(call.clone());

      let outcome = if state.failing.contains(&call.filters) {
        None
      } else {
        let needle = call.query.to_lowercase();

        let hits = state
          .records
          .iter()
          .filter(|record| {
            format!("type:{}", record["type"].as_str().unwrap_or_default())
              == call.filters
          })
          .filter(|record| {
            record.as_object().is_some_and(|fields| {
              fields.values().any(|value| {
                value
                  .as_str()
                  .is_some_and(|text| text.to_lowercase().contains(&needle))
              })
            })
          })
          .take(if state.ignore_page_size {
            usize::MAX
          } else {
            call.hits_per_page
          })
          .cloned()
          .collect::<Vec<_>>();

        Some(hits)
      };

      (state.delay, outcome)
    };

    time::sleep(delay).await;

    match outcome {
      Some(hits) => Json(json!({ "hits": hits, "nbHits": hits.len() }))
        .into_response(),
      None => (StatusCode::SERVICE_UNAVAILABLE, "index unavailable")
        .into_response(),
    }
  }

  pub(crate) fn server_config(&self) -> ServerConfig {
    ServerConfig {
      algolia_api_key: "test-key".into(),
      algolia_app_id: "TESTAPP".into(),
      algolia_host: Some(format!("http://{}", self.addr)),
      communities_index: "forum".into(),
      default_limit: 10,
      frontend_origins: vec!["http://localhost:5173".into()],
      index_timeout: Duration::from_secs(2),
      max_limit: 50,
      port: 0,
      posts_index: "forum".into(),
    }
  }

  pub(crate) async fn start() -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(Mutex::new(AlgoliaState::default()));

    let app = Router::new()
      .route("/1/indexes/{index}/query", post(Self::query))
      .with_state(state.clone());

    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });

    Self { addr, state }
  }
}

/// Scripted aggregator stand-in. Each query yields one post `<query>-post`
/// and one community with slug `<query>` after a configurable delay.
#[derive(Clone, Default)]
pub(crate) struct FakeSource {
  state: Arc<Mutex<SourceState>>,
}

#[derive(Default)]
struct SourceState {
  calls: Vec<String>,
  completed: Vec<String>,
  delays: HashMap<String, Duration>,
  empty: HashSet<String>,
  failing: HashSet<String>,
}

impl FakeSource {
  pub(crate) fn calls(&self) -> Vec<String> {
    self.state.lock().unwrap().calls.clone()
  }

  /// Queries whose response was produced, i.e. not cancelled mid-flight.
  pub(crate) fn completed(&self) -> Vec<String> {
    self.state.lock().unwrap().completed.clone()
  }

  pub(crate) fn delay(&self, query: &str, delay: Duration) {
    self
      .state
      .lock()
      .unwrap()
      .delays
      .insert(query.to_string(), delay);
  }

  pub(crate) fn empty(&self, query: &str) {
    self.state.lock().unwrap().empty.insert(query.to_string());
  }

  pub(crate) fn fail(&self, query: &str) {
    self.state.lock().unwrap().failing.insert(query.to_string());
  }
}

impl SearchSource for FakeSource {
  async fn search(&self, query: &str, _limit: usize) -> Result<SearchResults> {
    let delay = {
      let mut state = self.state.lock().unwrap();
      state.calls.push(query.to_string());
      state
        .delays
        .get(query)
        .copied()
        .unwrap_or(Duration::from_millis(50))
    };

    time::sleep(delay).await;

    let mut state = self.state.lock().unwrap();

    state.completed.push(query.to_string());

    if state.failing.contains(query) {
      return Err(anyhow!("search service returned 502 Bad Gateway"));
    }

    if state.empty.contains(query) {
      return Ok(SearchResults::default());
    }

    Ok(SearchResults {
      communities: vec![CommunityHit {
        display_name: Some(query.to_uppercase()),
        object_id: format!("{query}-community"),
        slug: Some(query.to_string()),
        ..CommunityHit::default()
      }],
      posts: vec![PostHit {
        content: Some(format!("all about {query}")),
        object_id: format!("{query}-post"),
        title: Some(query.to_string()),
        ..PostHit::default()
      }],
    })
  }
}
