use super::*;

#[derive(Debug, Error)]
pub(crate) enum AppError {
  #[error("limit must be a positive integer")]
  InvalidLimit,
  #[error(transparent)]
  Upstream(#[from] AggregateError),
}

/// JSON body of every non-2xx aggregator response.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct ErrorBody {
  pub(crate) error: String,
  #[serde(default)]
  pub(crate) failed: Vec<String>,
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let (status, failed) = match &self {
      AppError::InvalidLimit => (StatusCode::BAD_REQUEST, Vec::new()),
      AppError::Upstream(error) => (
        StatusCode::BAD_GATEWAY,
        error
          .collections()
          .into_iter()
          .map(|collection| collection.label().to_string())
          .collect(),
      ),
    };

    let body = ErrorBody {
      error: self.to_string(),
      failed,
    };

    (status, Json(body)).into_response()
  }
}
