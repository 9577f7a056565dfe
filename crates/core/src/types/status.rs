//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created as `Preparing` and are expected to move forward
/// through `Ready` to `Completed`. The status-update operation accepts any
/// target value; forward-only progression is a recommendation, not a
/// constraint the store enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Preparing,
    Ready,
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_preparing() {
        assert_eq!(OrderStatus::default(), OrderStatus::Preparing);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("delivered".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");

        let parsed: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, OrderStatus::Completed);
    }
}
