use super::*;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
  /// Send one query to the aggregator and print the JSON response
  Query {
    /// Maximum hits per group (defaults to SEARCH_LIMIT)
    #[arg(long)]
    limit: Option<usize>,
    query: String,
  },
  /// Run the search aggregator HTTP service
  Serve {
    /// Listen port (defaults to PORT)
    #[arg(long)]
    port: Option<u16>,
  },
  /// Interactive terminal search box
  Tui {
    /// Append debug logs to this file
    #[arg(long, value_name = "FILE")]
    debug: Option<PathBuf>,
  },
}

impl Command {
  fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new(default))
  }

  async fn query(limit: Option<usize>, query: String) -> Result {
    tracing_subscriber::fmt()
      .with_writer(io::stderr)
      .with_env_filter(Self::env_filter("warn"))
      .init();

    let config = ClientConfig::from_env()?;

    let limit = limit.unwrap_or(config.limit);

    ensure!(limit > 0, "--limit must be positive");

    let results = Client::new(&config)?.search(&query, limit).await?;

    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
  }

  pub(crate) async fn run(self) -> Result {
    match self {
      Self::Query { limit, query } => Self::query(limit, query).await,
      Self::Serve { port } => Self::serve(port).await,
      Self::Tui { debug } => Self::tui(debug),
    }
  }

  async fn serve(port: Option<u16>) -> Result {
    tracing_subscriber::fmt()
      .with_env_filter(Self::env_filter("info"))
      .init();

    let mut config = ServerConfig::from_env()?;

    if let Some(port) = port {
      config.port = port;
    }

    let index = AlgoliaIndex::new(&config)?;

    Server::new(index, &config).serve(&config).await
  }

  fn tui(debug: Option<PathBuf>) -> Result {
    if let Some(path) = debug {
      let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| {
          format!("could not open log file {}", path.display())
        })?;

      tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(Self::env_filter("debug"))
        .init();

      info!("debug log started, tail -f {}", path.display());
    }

    let config = ClientConfig::from_env()?;

    let mut app = App::new(Client::new(&config)?, &config);

    let mut terminal = initialize_terminal()?;

    let result = task::block_in_place(|| app.run(&mut terminal));

    restore_terminal(&mut terminal)?;

    result
  }
}
