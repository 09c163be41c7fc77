//! Service kinds and the fixed price table.
//!
//! Prices are whole US dollars, set once at order creation. Clients never
//! supply a price; the server derives it from the service kind.

use serde::{Deserialize, Serialize};

/// Flat price for a mixing order.
pub const PRICE_MIXING: i32 = 299;

/// Flat price for a mastering order.
pub const PRICE_MASTERING: i32 = 199;

/// The kind of work an order requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Mixing,
    Mastering,
}

impl ServiceKind {
    /// The wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Mixing => "mixing",
            ServiceKind::Mastering => "mastering",
        }
    }

    /// Flat price in whole US dollars for this service kind.
    pub fn price(self) -> i32 {
        match self {
            ServiceKind::Mixing => PRICE_MIXING,
            ServiceKind::Mastering => PRICE_MASTERING,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mixing" => Ok(ServiceKind::Mixing),
            "mastering" => Ok(ServiceKind::Mastering),
            other => Err(format!(
                "Invalid service kind '{other}'. Must be one of: mixing, mastering"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_table() {
        assert_eq!(ServiceKind::Mixing.price(), 299);
        assert_eq!(ServiceKind::Mastering.price(), 199);
    }

    #[test]
    fn test_prices_non_negative() {
        assert!(ServiceKind::Mixing.price() >= 0);
        assert!(ServiceKind::Mastering.price() >= 0);
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in [ServiceKind::Mixing, ServiceKind::Mastering] {
            assert_eq!(ServiceKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(ServiceKind::from_str("remix").is_err());
    }
}
