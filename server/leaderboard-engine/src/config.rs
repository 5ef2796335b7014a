//! Engine configuration with sane defaults.

use chrono::format::{Item, StrftimeItems};
use tracing::warn;

/// Hard cap on the length of every ranked list in a summary.
pub const MAX_PER_LIST: usize = 5;

/// Default product label shown in the summary welcome text.
pub const PRODUCT_NAME: &str = "DashBeats";

/// Presentation settings for summaries.
#[derive(Debug, Clone)]
pub struct Config {
  /// Label prefixed to the welcome text.
  pub product_label: String,
  /// chrono format string for window bounds in the welcome text.
  pub timestamp_format: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      product_label: PRODUCT_NAME.to_string(),
      timestamp_format: "%Y-%m-%d %H:%M:%S UTC".to_string(),
    }
  }
}

impl Config {
  /// Defaults overridden by `LEADERBOARD_PRODUCT_LABEL` and `LEADERBOARD_TIMESTAMP_FORMAT`.
  pub fn from_env() -> Self {
    let mut config = Self::default();
    if let Ok(label) = std::env::var("LEADERBOARD_PRODUCT_LABEL") {
      if !label.trim().is_empty() {
        config.product_label = label;
      }
    }
    if let Ok(format) = std::env::var("LEADERBOARD_TIMESTAMP_FORMAT") {
      if format_is_valid(&format) {
        config.timestamp_format = format;
      } else {
        warn!(value = %format, "ignoring invalid LEADERBOARD_TIMESTAMP_FORMAT");
      }
    }
    config
  }
}

/// True when `format` contains only chrono specifiers it understands.
pub fn format_is_valid(format: &str) -> bool {
  StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_format_is_valid() {
    assert!(format_is_valid(&Config::default().timestamp_format));
  }

  #[test]
  fn unknown_specifier_is_invalid() {
    assert!(!format_is_valid("%Y-%Q"));
    assert!(format_is_valid("%d/%m/%Y"));
  }
}
