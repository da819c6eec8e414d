use super::*;

pub(crate) struct Server<I> {
  aggregator: Arc<Aggregator<I>>,
  default_limit: usize,
  max_limit: usize,
}

impl<I> Clone for Server<I> {
  fn clone(&self) -> Self {
    Self {
      aggregator: Arc::clone(&self.aggregator),
      default_limit: self.default_limit,
      max_limit: self.max_limit,
    }
  }
}

impl<I: SearchIndex> Server<I> {
  fn cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
      .iter()
      .map(|origin| {
        HeaderValue::from_str(origin)
          .with_context(|| format!("invalid front-end origin: {origin}"))
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(
      CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
          Method::GET,
          Method::POST,
          Method::PATCH,
          Method::PUT,
          Method::DELETE,
          Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60)),
    )
  }

  pub(crate) fn new(index: I, config: &ServerConfig) -> Self {
    Self {
      aggregator: Arc::new(Aggregator::new(index)),
      default_limit: config.default_limit,
      max_limit: config.max_limit,
    }
  }

  pub(crate) fn router(self, origins: &[String]) -> Result<Router> {
    Ok(
      Router::new()
        .route("/search", get(Self::search))
        .layer(Self::cors(origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(self),
    )
  }

  async fn search(
    State(server): State<Self>,
    Query(params): Query<SearchParams>,
  ) -> Result<Json<SearchResults>, AppError> {
    if params.q.trim().is_empty() {
      return Ok(Json(SearchResults::default()));
    }

    let limit = params.effective_limit(server.default_limit, server.max_limit)?;

    let results = server.aggregator.search(&params.q, limit).await?;

    debug!(
      posts = results.posts.len(),
      communities = results.communities.len(),
      "search settled"
    );

    Ok(Json(results))
  }

  pub(crate) async fn serve(self, config: &ServerConfig) -> Result {
    let app = self.router(&config.frontend_origins)?;

    let address = format!("0.0.0.0:{}", config.port);

    let listener = TcpListener::bind(&address)
      .await
      .with_context(|| format!("could not bind to {address}"))?;

    info!("Server running on {address}");

    axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await
      .context("server terminated unexpectedly")?;

    info!("Server shut down");

    Ok(())
  }
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(error) = signal::ctrl_c().await {
      warn!("could not install Ctrl+C handler: {error}");
      future::pending::<()>().await;
    }

    info!("Received Ctrl+C, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
        info!("Received terminate signal, shutting down");
      }
      Err(error) => {
        warn!("could not install terminate handler: {error}");
        future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
}
