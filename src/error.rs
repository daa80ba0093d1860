use thiserror::Error;

/// Errors surfaced synchronously to the caller.
///
/// All of these stem from bad input, not transient conditions, so none are
/// retried. Each carries enough context for the caller to render a clear
/// message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Lookup failed both exact and substring matching.
    #[error("team '{name}' not found in ratings table")]
    TeamNotFound { name: String },

    /// Book spread or total is not a finite number.
    #[error("invalid book line: {field} is {value}")]
    InvalidLine { field: &'static str, value: f64 },

    /// A team's ratings produced a non-finite points-per-possession.
    #[error("degenerate ratings for '{team}': {detail}")]
    DegenerateRatings { team: String, detail: String },

    /// Caller-supplied model settings are unusable.
    #[error("invalid model config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ProjectionError::TeamNotFound {
            name: "Zzzyzx".to_string(),
        };
        assert!(err.to_string().contains("Zzzyzx"));

        let err = ProjectionError::InvalidLine {
            field: "total",
            value: f64::NAN,
        };
        assert!(err.to_string().contains("total"));

        let err = ProjectionError::DegenerateRatings {
            team: "Duke".to_string(),
            detail: "non-finite ppp".to_string(),
        };
        assert!(err.to_string().contains("Duke"));
    }
}
