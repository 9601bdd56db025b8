//! Terminal identifier type.

use std::fmt;

/// Maximum length of a terminal identifier.
pub const MAX_TERMINAL_ID_LEN: usize = 10;

/// Error returned when parsing an invalid terminal identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid terminal identifier: {reason}")]
pub struct InvalidTerminalId {
    reason: &'static str,
}

/// A docking station terminal identifier that is safe to embed in query text.
///
/// Terminal IDs are 1 to 10 ASCII letters or digits. The store client has
/// no parameter binding, so this type is the only way a caller-supplied
/// identifier reaches SQL: query builders accept `&TerminalId`, never `&str`.
///
/// # Examples
///
/// ```
/// use bikes_server::domain::TerminalId;
///
/// let id = TerminalId::parse("001023").unwrap();
/// assert_eq!(id.as_str(), "001023");
///
/// assert!(TerminalId::parse("").is_err());
/// assert!(TerminalId::parse("'; DROP TABLE x;--").is_err());
/// assert!(TerminalId::parse("12345678901").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TerminalId(String);

impl TerminalId {
    /// Parse a terminal identifier.
    ///
    /// The input must be between 1 and 10 characters, each one of `A-Z`,
    /// `a-z` or `0-9`.
    pub fn parse(s: &str) -> Result<Self, InvalidTerminalId> {
        if s.is_empty() {
            return Err(InvalidTerminalId {
                reason: "must not be empty",
            });
        }

        // Byte length, so multi-byte characters can't sneak past the limit
        if s.len() > MAX_TERMINAL_ID_LEN {
            return Err(InvalidTerminalId {
                reason: "must be at most 10 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidTerminalId {
                reason: "must contain only ASCII letters and digits",
            });
        }

        Ok(TerminalId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminalId({})", self.0)
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
