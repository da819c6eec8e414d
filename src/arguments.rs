use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "forum-search",
  version,
  about = "Federated post and community search for the forum"
)]
pub(crate) struct Arguments {
  #[command(subcommand)]
  command: Command,
}

impl Arguments {
  pub(crate) async fn run(self) -> Result {
    self.command.run().await
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  #[test]
  fn parses_query_with_limit() {
    let arguments = Arguments::try_parse_from([
      "forum-search",
      "query",
      "--limit",
      "3",
      "vrchat",
    ])
    .unwrap();

    let Command::Query { limit, query } = arguments.command else {
      panic!("expected query command");
    };

    assert_eq!(limit, Some(3));
    assert_eq!(query, "vrchat");
  }

  #[test]
  fn parses_serve_port_override() {
    let arguments =
      Arguments::try_parse_from(["forum-search", "serve", "--port", "8080"])
        .unwrap();

    assert!(matches!(
      arguments.command,
      Command::Serve { port: Some(8080) }
    ));
  }

  #[test]
  fn parses_tui_debug_file() {
    let arguments = Arguments::try_parse_from([
      "forum-search",
      "tui",
      "--debug",
      "/tmp/forum-search.log",
    ])
    .unwrap();

    let Command::Tui { debug } = arguments.command else {
      panic!("expected tui command");
    };

    assert_eq!(debug, Some(PathBuf::from("/tmp/forum-search.log")));
  }

  #[test]
  fn subcommand_is_required() {
    assert!(Arguments::try_parse_from(["forum-search"]).is_err());
  }
}
