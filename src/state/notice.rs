//! Error and success banners shown under the booking form

/// The single banner slot. Holding one value means showing an error always
/// hides the success message and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Notice {
    #[default]
    None,
    Error(String),
    Success(String),
}

impl Notice {
    pub fn error(&self) -> Option<&str> {
        match self {
            Notice::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match self {
            Notice::Success(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Notice::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert!(Notice::default().is_none());
    }

    #[test]
    fn test_accessors_are_exclusive() {
        let error = Notice::Error("bad".to_string());
        assert_eq!(error.error(), Some("bad"));
        assert!(error.success().is_none());

        let success = Notice::Success("good".to_string());
        assert_eq!(success.success(), Some("good"));
        assert!(success.error().is_none());
    }
}
