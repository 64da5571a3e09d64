use std::fmt;
use std::str::FromStr;

/// Error codes for all reconstruction diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Registry construction and loading
/// - E2xxx: Resolution and marshalling
/// - E3xxx: Live model loading and invocation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Registry Errors (E1xxx)
    /// Duplicate definition name
    E1001,
    /// Rule references a slot the variant does not declare
    E1002,
    /// Unknown or malformed slot type token
    E1003,
    /// Rule count disagrees with the target operation's arity
    E1004,
    /// Ill-formed projection, concatenation, or gather rule
    E1005,
    /// Unreadable or invalid registry document
    E1006,

    // Resolution Errors (E2xxx)
    /// No variant accepts the actual signature
    E2001,
    /// Malformed constraint spec
    E2002,
    /// Pair projection applied to a non-pair value
    E2003,
    /// Unknown definition name
    E2004,

    // Invocation Errors (E3xxx)
    /// Variable reference missing from the live store
    E3001,
    /// Unreadable or invalid model document
    E3002,
    /// Variable store has no index left
    E3003,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
    ];

    /// Get the numeric code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Registry
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Resolution
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            // Invocation
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
        }
    }

    /// Check if this is a registry error (E1xxx range).
    pub fn is_registry_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E2001.to_string(), "E2001");
        assert_eq!(ErrorCode::E3001.as_str(), "E3001");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("e2002".parse::<ErrorCode>(), Ok(ErrorCode::E2002));
        assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
    }

    #[test]
    fn test_registry_range() {
        assert!(ErrorCode::E1004.is_registry_error());
        assert!(!ErrorCode::E2001.is_registry_error());
    }
}
