use super::*;

/// Debounced, cancellable search state for one input field.
///
/// Every mutable resource the pipeline needs (the debounce timer, the
/// in-flight request and its cancellation token) is owned here, so two boxes
/// never interfere. Timer and request tasks report back through `event_tx`;
/// the owner drains the matching receiver into [`SearchBox::handle_event`].
pub(crate) struct SearchBox<S> {
  debounce: Duration,
  event_tx: UnboundedSender<Event>,
  generation: u64,
  handle: Handle,
  in_flight: Option<PendingSearch>,
  limit: usize,
  next_request_id: u64,
  open: bool,
  phase: Phase,
  query: String,
  results: SearchResults,
  source: S,
  timer: Option<JoinHandle<()>>,
}

impl<S: SearchSource> SearchBox<S> {
  fn arm_debounce(&mut self) {
    self.generation = self.generation.wrapping_add(1);

    let (generation, delay, sender) =
      (self.generation, self.debounce, self.event_tx.clone());

    self.timer = Some(self.handle.spawn(async move {
      time::sleep(delay).await;
      let _ = sender.send(Event::DebounceElapsed { generation });
    }));
  }

  pub(crate) fn backspace(&mut self) {
    let mut query = self.query.clone();

    if query.pop().is_some() {
      self.set_query(query);
    }
  }

  fn cancel_in_flight(&mut self) {
    if let Some(pending) = self.in_flight.take() {
      debug!(
        request_id = pending.request_id,
        query = %pending.query,
        "cancelling superseded search"
      );

      pending.token.cancel();
    }
  }

  pub(crate) fn clear(&mut self) {
    self.set_query(String::new());
  }

  /// Hides the popover. The query and any settled results are kept.
  pub(crate) fn close(&mut self) {
    self.open = false;
  }

  fn disarm_debounce(&mut self) {
    if let Some(timer) = self.timer.take() {
      timer.abort();
    }
  }

  /// Reopens the popover over the last settled results, if there are any.
  pub(crate) fn focus(&mut self) {
    if self.phase == Phase::Settled && !self.results.is_empty() {
      self.open = true;
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::DebounceElapsed { generation } => {
        if generation != self.generation || self.phase != Phase::Pending {
          return;
        }

        self.timer = None;

        self.start_fetch();
      }
      Event::SearchResults { request_id, result } => {
        let Some(pending) = self.in_flight.as_ref() else {
          return;
        };

        if pending.request_id != request_id {
          return;
        }

        let Some(pending) = self.in_flight.take() else {
          return;
        };

        match result {
          Ok(results) => {
            debug!(
              query = %pending.query,
              posts = results.posts.len(),
              communities = results.communities.len(),
              "search settled"
            );

            self.results = results;
            self.phase = Phase::Settled;
          }
          Err(error) => {
            warn!(query = %pending.query, "search failed: {error:#}");

            self.results = SearchResults::default();
            self.phase = Phase::Failed(format!("{error:#}"));
          }
        }

        self.open = true;
      }
    }
  }

  pub(crate) fn insert_char(&mut self, ch: char) {
    let mut query = self.query.clone();
    query.push(ch);
    self.set_query(query);
  }

  pub(crate) fn is_open(&self) -> bool {
    self.open
  }

  pub(crate) fn new(
    source: S,
    event_tx: UnboundedSender<Event>,
    debounce: Duration,
    limit: usize,
  ) -> Self {
    Self {
      debounce,
      event_tx,
      generation: 0,
      handle: Handle::current(),
      in_flight: None,
      limit,
      next_request_id: 0,
      open: false,
      phase: Phase::Idle,
      query: String::new(),
      results: SearchResults::default(),
      source,
      timer: None,
    }
  }

  pub(crate) fn phase(&self) -> &Phase {
    &self.phase
  }

  pub(crate) fn popover(&self) -> Popover {
    match &self.phase {
      Phase::Idle => Popover::Hidden,
      _ if !self.open => Popover::Hidden,
      Phase::Pending | Phase::Fetching => Popover::Loading,
      Phase::Failed(message) => Popover::Failed(message.clone()),
      Phase::Settled if self.results.is_empty() => Popover::Empty,
      Phase::Settled => Popover::Results {
        communities: self
          .results
          .communities
          .iter()
          .map(ResultEntry::from)
          .collect(),
        posts: self.results.posts.iter().map(ResultEntry::from).collect(),
      },
    }
  }

  pub(crate) fn query(&self) -> &str {
    &self.query
  }

  pub(crate) fn results(&self) -> &SearchResults {
    &self.results
  }

  /// Picks a visible entry and closes the popover without touching the query.
  pub(crate) fn select(&mut self, index: usize) -> Option<ResultEntry> {
    let entry = self.popover().into_entries().into_iter().nth(index)?;

    self.open = false;

    Some(entry)
  }

  /// Replaces the query text. Any in-flight request is cancelled and the
  /// debounce timer restarts; blank text goes straight back to idle.
  pub(crate) fn set_query(&mut self, text: impl Into<String>) {
    let text = text.into();

    if text == self.query {
      return;
    }

    self.query = text;

    self.cancel_in_flight();
    self.disarm_debounce();

    self.results = SearchResults::default();

    if self.query.trim().is_empty() {
      self.phase = Phase::Idle;
      self.open = false;
      return;
    }

    self.phase = Phase::Pending;
    self.open = true;

    self.arm_debounce();
  }

  fn start_fetch(&mut self) {
    self.cancel_in_flight();

    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    let query = self.query.trim().to_string();

    let token = CancellationToken::new();

    let (source, sender, cancelled, limit) = (
      self.source.clone(),
      self.event_tx.clone(),
      token.clone(),
      self.limit,
    );

    let request = query.clone();

    self.handle.spawn(async move {
      tokio::select! {
        biased;
        () = cancelled.cancelled() => {}
        result = source.search(&request, limit) => {
          let _ = sender.send(Event::SearchResults { request_id, result });
        }
      }
    });

    debug!(request_id, query = %query, "search issued");

    self.in_flight = Some(PendingSearch {
      query,
      request_id,
      token,
    });

    self.phase = Phase::Fetching;
  }
}

impl<S> Drop for SearchBox<S> {
  fn drop(&mut self) {
    if let Some(pending) = self.in_flight.take() {
      pending.token.cancel();
    }

    if let Some(timer) = self.timer.take() {
      timer.abort();
    }
  }
}
