use super::*;

pub(crate) struct App<S> {
  event_rx: UnboundedReceiver<Event>,
  frontend_url: String,
  message: Option<(String, Instant)>,
  search_box: SearchBox<S>,
  selected: usize,
}

impl<S: SearchSource> App<S> {
  fn draw(&self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let query = self.search_box.query();

    let input = Paragraph::new(query.to_string()).block(
      Block::default()
        .title(SEARCH_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(input, layout[0]);

    let cursor_offset =
      u16::try_from(query.chars().count()).unwrap_or(u16::MAX);

    frame.set_cursor_position((
      layout[0]
        .x
        .saturating_add(1)
        .saturating_add(cursor_offset)
        .min(layout[0].right().saturating_sub(2)),
      layout[0].y.saturating_add(1),
    ));

    self.draw_popover(frame, layout[1]);

    let status = Paragraph::new(self.status())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);
  }

  fn draw_popover(&self, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    let items = match self.search_box.popover() {
      Popover::Hidden => return,
      Popover::Loading => vec![Self::notice(LOADING_STATUS, Color::DarkGray)],
      Popover::Empty => vec![Self::notice(EMPTY_STATUS, Color::DarkGray)],
      Popover::Failed(message) => vec![Self::notice(
        &format!("Search failed: {message}"),
        Color::Red,
      )],
      Popover::Results { communities, posts } => {
        let mut items = Vec::new();

        let sections = [("Communities", communities), ("Posts", posts)];

        let mut index = 0;

        for (heading, entries) in sections {
          if entries.is_empty() {
            continue;
          }

          items.push(ListItem::new(Line::from(Span::styled(
            heading,
            Style::default()
              .fg(Color::Yellow)
              .add_modifier(Modifier::BOLD),
          ))));

          for entry in &entries {
            items.push(Self::entry_item(entry, index == self.selected));
            index += 1;
          }
        }

        items
      }
    };

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(block), area);
  }

  fn entry_count(&self) -> usize {
    self.search_box.popover().into_entries().len()
  }

  fn entry_item(entry: &ResultEntry, selected: bool) -> ListItem<'static> {
    let title_style = if selected {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::White)
    };

    let marker = if selected { "> " } else { "  " };

    let mut lines = vec![Line::from(vec![
      Span::raw(marker),
      Span::styled(entry.title.clone(), title_style),
    ])];

    if let Some(detail) = &entry.detail {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(detail.clone(), Style::default().fg(Color::DarkGray)),
      ]));
    }

    ListItem::new(lines)
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Action {
    let modifiers = key.modifiers;

    if modifiers.contains(KeyModifiers::CONTROL)
      && matches!(key.code, KeyCode::Char('c' | 'C'))
    {
      return Action::Quit;
    }

    match key.code {
      KeyCode::Esc => {
        if self.search_box.is_open() {
          self.search_box.close();
          return Action::None;
        }

        return Action::Quit;
      }
      KeyCode::Enter => {
        let Some(entry) = self.search_box.select(self.selected) else {
          return Action::None;
        };

        debug!(
          id = %entry.id,
          collection = %entry.collection,
          icon = ?entry.icon_url,
          route = %entry.route,
          "opening search result"
        );

        return Action::Open(entry.url(&self.frontend_url));
      }
      KeyCode::Tab => self.search_box.focus(),
      KeyCode::Up => {
        self.selected = self.selected.saturating_sub(1);
        return Action::None;
      }
      KeyCode::Down => {
        self.selected = self
          .selected
          .saturating_add(1)
          .min(self.entry_count().saturating_sub(1));
        return Action::None;
      }
      KeyCode::Backspace => self.search_box.backspace(),
      KeyCode::Char(ch) => {
        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return Action::None;
        }

        self.search_box.insert_char(ch);
      }
      _ => return Action::None,
    }

    self.selected = 0;

    Action::None
  }

  pub(crate) fn new(source: S, config: &ClientConfig) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      event_rx,
      frontend_url: config.frontend_url.clone(),
      message: None,
      search_box: SearchBox::new(
        source,
        event_tx,
        config.debounce,
        config.limit,
      ),
      selected: 0,
    }
  }

  fn notice(text: &str, color: Color) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(text.to_string(), Style::default().fg(color)),
    ]))
  }

  fn open(&mut self, url: &str) {
    let message = match webbrowser::open(url) {
      Ok(()) => format!("Opened in browser: {}", truncate(url, 60)),
      Err(error) => format!("Could not open link: {error}"),
    };

    self.message = Some((message, Instant::now()));
  }

  fn process_pending_events(&mut self) {
    while let Ok(event) = self.event_rx.try_recv() {
      let phase = self.search_box.phase().clone();

      self.search_box.handle_event(event);

      if *self.search_box.phase() != phase {
        self.selected = 0;
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(50))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      match self.handle_key(key) {
        Action::None => {}
        Action::Open(url) => self.open(&url),
        Action::Quit => break,
      }
    }

    Ok(())
  }

  fn status(&self) -> String {
    match (&self.message, self.search_box.phase()) {
      (Some((message, shown_at)), _)
        if shown_at.elapsed() < MESSAGE_LIFETIME =>
      {
        message.clone()
      }
      (_, Phase::Settled) => format!(
        "{} results • {SEARCH_STATUS}",
        self.search_box.results().len()
      ),
      _ => SEARCH_STATUS.to_string(),
    }
  }
}
