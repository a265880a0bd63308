use std::time::Duration;

const REQUEST_TIMEOUT_ENV: &str = "PATHFINDER_REQUEST_TIMEOUT_SECS";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// The adapter itself never times out; the chat controller races each
// call against this deadline.
pub fn request_timeout() -> Duration {
  let value = std::env::var(REQUEST_TIMEOUT_ENV).ok();
  Duration::from_secs(parse_timeout_secs(value.as_deref()))
}

fn parse_timeout_secs(value: Option<&str>) -> u64 {
  value
    .and_then(|raw| {
      let trimmed = raw.trim();
      if trimmed.is_empty() {
        None
      } else {
        trimmed.parse::<u64>().ok()
      }
    })
    .filter(|secs| *secs > 0)
    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

#[cfg(test)]
mod tests {
  use super::parse_timeout_secs;

  #[test]
  fn parse_timeout_defaults_when_unset_or_invalid() {
    assert_eq!(parse_timeout_secs(None), 120);
    assert_eq!(parse_timeout_secs(Some("")), 120);
    assert_eq!(parse_timeout_secs(Some("not-a-number")), 120);
    assert_eq!(parse_timeout_secs(Some("0")), 120);
  }

  #[test]
  fn parse_timeout_accepts_valid_numbers() {
    assert_eq!(parse_timeout_secs(Some("30")), 30);
    assert_eq!(parse_timeout_secs(Some(" 45 ")), 45);
  }
}
