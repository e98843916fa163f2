use core::fmt;

/// Errors generated while validating a command keyword at tree-build time.
///
/// Matching itself never produces an error: an input that resolves to no
/// node is an absent result, not a fault. Only the construction of the
/// tree enforces rules on the keywords it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeywordError {
    /// The keyword contains no characters.
    Empty,

    /// The keyword does not begin with an uppercase ASCII letter, so no
    /// short form can be derived from it.
    NoLeadingUppercase,
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordError::Empty => write!(f, "keyword is empty"),
            KeywordError::NoLeadingUppercase => {
                write!(f, "keyword must start with an uppercase ASCII letter")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KeywordError {}

// ==================== TESTS =======================

#[cfg(test)]
mod keyword_error_tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(KeywordError::Empty.to_string(), "keyword is empty");
        assert_eq!(
            KeywordError::NoLeadingUppercase.to_string(),
            "keyword must start with an uppercase ASCII letter"
        );
    }

    #[test]
    fn test_error_is_copy_and_comparable() {
        let err = KeywordError::Empty;
        let copy = err;

        assert_eq!(err, copy);
        assert_ne!(KeywordError::Empty, KeywordError::NoLeadingUppercase);
    }
}
