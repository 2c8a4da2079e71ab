use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of any plan element, leaf or composite.
///
/// The variants are not linearly ordered: precedence between them is defined only
/// by the aggregation rule table in [`crate::plan::aggregate`], which is evaluated
/// top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Element has not started work
    Pending,
    /// Element has been evaluated and is ready to start
    Prepared,
    /// Element has begun launching work
    Starting,
    /// Element is actively working
    InProgress,
    /// Element is deliberately paused (interruption or upstream wait)
    Waiting,
    /// Element finished successfully
    Complete,
    /// Element (or a descendant) recorded an error
    Error,
}

impl Status {
    /// Check if this is a terminal state for plan execution purposes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }

    /// Check if the element is actively running.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::InProgress)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Prepared => write!(f, "prepared"),
            Self::Starting => write!(f, "starting"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Waiting => write!(f, "waiting"),
            Self::Complete => write!(f, "complete"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "prepared" => Ok(Self::Prepared),
            "starting" => Ok(Self::Starting),
            "in_progress" => Ok(Self::InProgress),
            "waiting" => Ok(Self::Waiting),
            "complete" => Ok(Self::Complete),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

/// True if every status in the slice equals `status`. Vacuously true when empty.
pub fn all_have_status(status: Status, statuses: &[Status]) -> bool {
    statuses.iter().all(|s| *s == status)
}

/// True if at least one status in the slice equals `status`.
pub fn any_have_status(status: Status, statuses: &[Status]) -> bool {
    statuses.iter().any(|s| *s == status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(Status::InProgress.to_string(), "in_progress");
        assert_eq!("prepared".parse::<Status>().unwrap(), Status::Prepared);
        assert!("bogus".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&Status::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
        let parsed: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Status::Waiting);
    }

    #[test]
    fn test_terminal_states() {
        assert!(Status::Complete.is_terminal());
        assert!(Status::Error.is_terminal());
        assert!(!Status::Waiting.is_terminal());
        assert!(!Status::Pending.is_terminal());
    }

    #[test]
    fn test_all_any_helpers() {
        let statuses = [Status::Complete, Status::Pending];
        assert!(!all_have_status(Status::Complete, &statuses));
        assert!(any_have_status(Status::Complete, &statuses));
        assert!(any_have_status(Status::Pending, &statuses));
        assert!(!any_have_status(Status::Waiting, &statuses));
        // Vacuous truth on the empty slice.
        assert!(all_have_status(Status::Complete, &[]));
    }
}
