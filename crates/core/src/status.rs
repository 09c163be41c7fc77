//! The order status workflow.
//!
//! A closed set of four values forming a linear progression used for
//! progress display. Transition direction is deliberately unrestricted:
//! an authorized actor may set any status from any status, including
//! moving backward for rework. Authorization lives in the guard layers,
//! not here.

use serde::{Deserialize, Serialize};

/// Status an order starts in at creation.
pub const STATUS_NEW: &str = "new";

/// Work has been picked up by an engineer.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// A mix/master is awaiting client review.
pub const STATUS_REVIEW: &str = "review";

/// The order is done and delivered.
pub const STATUS_COMPLETED: &str = "completed";

/// All valid status values, in workflow order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_NEW,
    STATUS_IN_PROGRESS,
    STATUS_REVIEW,
    STATUS_COMPLETED,
];

/// Order workflow status.
///
/// Serializes to the snake_case wire/database form (`"in_progress"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    InProgress,
    Review,
    Completed,
}

impl OrderStatus {
    /// All statuses in workflow order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::InProgress,
        OrderStatus::Review,
        OrderStatus::Completed,
    ];

    /// The wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => STATUS_NEW,
            OrderStatus::InProgress => STATUS_IN_PROGRESS,
            OrderStatus::Review => STATUS_REVIEW,
            OrderStatus::Completed => STATUS_COMPLETED,
        }
    }

    /// Zero-based position in the workflow, used only for progress display.
    pub fn progress_index(self) -> usize {
        match self {
            OrderStatus::New => 0,
            OrderStatus::InProgress => 1,
            OrderStatus::Review => 2,
            OrderStatus::Completed => 3,
        }
    }

    /// Human-readable label: underscores become spaces, words capitalized.
    pub fn display(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_NEW => Ok(OrderStatus::New),
            STATUS_IN_PROGRESS => Ok(OrderStatus::InProgress),
            STATUS_REVIEW => Ok(OrderStatus::Review),
            STATUS_COMPLETED => Ok(OrderStatus::Completed),
            other => Err(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }
}

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_all_statuses_valid() {
        for status in OrderStatus::ALL {
            assert!(validate_status(status.as_str()).is_ok());
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = validate_status("cancelled");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid status"));
    }

    #[test]
    fn test_empty_status_rejected() {
        assert!(validate_status("").is_err());
    }

    #[test]
    fn test_progress_indices_are_workflow_order() {
        let indices: Vec<usize> = OrderStatus::ALL.iter().map(|s| s.progress_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_display_capitalizes_and_strips_underscores() {
        for status in OrderStatus::ALL {
            let label = status.display();
            assert!(!label.contains('_'), "label '{label}' contains underscore");
            for word in label.split(' ') {
                assert!(
                    word.chars().next().unwrap().is_uppercase(),
                    "word '{word}' not capitalized"
                );
            }
        }
        assert_eq!(OrderStatus::InProgress.display(), "In Progress");
        assert_eq!(OrderStatus::New.display(), "New");
    }

    #[test]
    fn test_parse_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_parse_rejects_display_form() {
        assert!(OrderStatus::from_str("In Progress").is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::InProgress);
    }
}
