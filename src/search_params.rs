use super::*;

/// Raw `/search` query string. `limit` stays textual so a malformed value
/// is reported by the handler, after the blank-query fast path.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
  pub(crate) limit: Option<String>,
  #[serde(default)]
  pub(crate) q: String,
}

impl SearchParams {
  /// Absent means the configured default; zero or anything that is not a
  /// positive integer is rejected; anything above the maximum is clamped.
  pub(crate) fn effective_limit(
    &self,
    default: usize,
    max: usize,
  ) -> Result<usize, AppError> {
    let Some(limit) = self.limit.as_deref() else {
      return Ok(default.min(max));
    };

    match limit.trim().parse::<usize>() {
      Ok(0) | Err(_) => Err(AppError::InvalidLimit),
      Ok(limit) => Ok(limit.min(max)),
    }
  }
}
