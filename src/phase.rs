/// Lifecycle of a single search box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
  Failed(String),
  Fetching,
  Idle,
  Pending,
  Settled,
}
