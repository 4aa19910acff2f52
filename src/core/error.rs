use thiserror::Error;

/// Reasons a new item is refused by the add dialog.
///
/// The `Display` text is exactly what the user sees in the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter title")]
    BlankTitle,
    #[error("Enter description")]
    BlankDescription,
}

/// Checks the draft fields of the add dialog. Title is checked first.
pub fn validate_draft(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::BlankDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_wins_over_blank_description() {
        assert_eq!(validate_draft("", ""), Err(ValidationError::BlankTitle));
        assert_eq!(validate_draft("  \t", "x"), Err(ValidationError::BlankTitle));
    }

    #[test]
    fn test_blank_description() {
        assert_eq!(
            validate_draft("Buy milk", "   "),
            Err(ValidationError::BlankDescription)
        );
    }

    #[test]
    fn test_valid_draft() {
        assert_eq!(validate_draft(" Buy milk ", "2%"), Ok(()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::BlankTitle.to_string(), "Enter title");
        assert_eq!(ValidationError::BlankDescription.to_string(), "Enter description");
    }
}
