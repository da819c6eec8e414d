use {
  action::Action,
  aggregator::Aggregator,
  algolia::AlgoliaIndex,
  anyhow::{Context, anyhow, ensure},
  app::App,
  arguments::Arguments,
  axum::{
    Json, Router,
    extract::{Query, State},
    http::{
      HeaderValue, Method, StatusCode,
      header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::get,
  },
  clap::{Parser, Subcommand},
  client::Client,
  collection::Collection,
  command::Command,
  community_hit::CommunityHit,
  config::{ClientConfig, ServerConfig},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  error::{AppError, ErrorBody},
  event::Event,
  futures::future::join,
  index_error::{AggregateError, IndexError},
  pending_search::PendingSearch,
  phase::Phase,
  popover::Popover,
  post_hit::PostHit,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
  },
  result_entry::ResultEntry,
  search_box::SearchBox,
  search_index::SearchIndex,
  search_params::SearchParams,
  search_results::SearchResults,
  search_source::SearchSource,
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::{Value, json},
  server::Server,
  std::{
    backtrace::BacktraceStatus,
    env,
    fmt::{self, Display},
    fs,
    future::{self, Future},
    io::{self, IsTerminal, Stdout},
    path::PathBuf,
    process,
    str::FromStr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
  },
  thiserror::Error,
  tokio::{
    net::TcpListener,
    runtime::Handle,
    signal,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::{self, JoinHandle},
    time,
  },
  tokio_util::sync::CancellationToken,
  tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  utils::{deserialize_optional_string, plain_snippet, truncate},
};

mod action;
mod aggregator;
mod algolia;
mod app;
mod arguments;
mod client;
mod collection;
mod command;
mod community_hit;
mod config;
mod error;
mod event;
mod index_error;
mod pending_search;
mod phase;
mod popover;
mod post_hit;
mod result_entry;
mod search_box;
mod search_index;
mod search_params;
mod search_results;
mod search_source;
mod server;
#[cfg(test)]
mod test_support;
mod utils;

const POST_SNIPPET_CHARS: usize = 80;

const SEARCH_TITLE: &str = "Search";

const SEARCH_STATUS: &str =
  "type to search • ↑/↓ select • enter open • tab reopen • esc close/quit";

const LOADING_STATUS: &str = "Searching...";
const EMPTY_STATUS: &str = "No results";

const MESSAGE_LIFETIME: Duration = Duration::from_secs(3);

const BASE_INDENT: &str = "  ";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

#[tokio::main]
async fn main() {
  if let Err(error) = Arguments::parse().run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
