/// What the terminal loop should do after a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  None,
  Open(String),
  Quit,
}
