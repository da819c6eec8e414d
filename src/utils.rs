use super::*;

pub(crate) fn deserialize_optional_string<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

/// Flattens post content into a single display line: tags become spaces,
/// entities are decoded, runs of whitespace collapse.
pub(crate) fn plain_snippet(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;
  let mut last_was_space = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        inside_tag = true;

        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      '>' if inside_tag => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ if ch.is_whitespace() => {
        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      _ => {
        cleaned.push(ch);
        last_was_space = false;
      }
    }
  }

  let decoded = html_escape::decode_html_entities(cleaned.trim());

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shortens `text` to at most `max_chars` characters, ellipsis included.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  const ELLIPSIS: &str = "...";

  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = text
    .chars()
    .take(max_chars.saturating_sub(ELLIPSIS.len()))
    .collect::<String>();

  result.truncate(result.trim_end().len());
  result.push_str(ELLIPSIS);

  result
}

#[cfg(test)]
mod tests {
  use {super::*, serde::Deserialize};

  #[derive(Deserialize, Debug, PartialEq)]
  struct OptionalWrapper {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    value: Option<String>,
  }

  #[test]
  fn truncate_returns_original_when_within_limit() {
    assert_eq!(truncate("short", 10), "short");
  }

  #[test]
  fn truncate_appends_ellipsis_when_exceeding_limit() {
    assert_eq!(truncate("This is a longer line", 7), "This...");
  }

  #[test]
  fn truncate_trims_trailing_space_before_ellipsis() {
    assert_eq!(truncate("This is a", 8), "This...");
  }

  #[test]
  fn truncate_counts_characters_not_bytes() {
    assert_eq!(truncate("検索中ですよね", 6), "検索中...");
  }

  #[test]
  fn truncate_never_exceeds_limit() {
    let text = "word ".repeat(40);

    for max_chars in [10, 79, 80, 81] {
      assert!(truncate(&text, max_chars).chars().count() <= max_chars);
    }
  }

  #[test]
  fn plain_snippet_strips_tags_and_decodes_entities() {
    assert_eq!(
      plain_snippet("<p>Meetup &amp; <b>photos</b></p>\n<ul><li>one</li></ul>"),
      "Meetup & photos one"
    );
  }

  #[test]
  fn plain_snippet_collapses_whitespace() {
    assert_eq!(
      plain_snippet("first line\n\n  second\tline"),
      "first line second line"
    );
  }

  #[test]
  fn plain_snippet_keeps_stray_closing_angle() {
    assert_eq!(plain_snippet("a > b"), "a > b");
  }

  #[test]
  fn optional_string_accepts_missing_null_string_and_number() {
    let cases = [
      ("{}", None),
      (r#"{"value":null}"#, None),
      (r#"{"value":"abc"}"#, Some("abc".to_string())),
      (r#"{"value":42}"#, Some("42".to_string())),
    ];

    for (input, expected) in cases {
      let wrapper: OptionalWrapper = serde_json::from_str(input).unwrap();
      assert_eq!(wrapper.value, expected, "input: {input}");
    }
  }

  #[test]
  fn optional_string_rejects_structured_values() {
    for input in [r#"{"value":true}"#, r#"{"value":[1]}"#, r#"{"value":{}}"#] {
      assert!(
        serde_json::from_str::<OptionalWrapper>(input).is_err(),
        "input: {input}"
      );
    }
  }
}
