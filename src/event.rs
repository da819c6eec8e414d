use super::*;

pub(crate) enum Event {
  DebounceElapsed {
    generation: u64,
  },
  SearchResults {
    request_id: u64,
    result: Result<SearchResults>,
  },
}
