//! CLI command handlers that are not a flow of their own.

pub mod doctor;

use crate::error::{DevtoolError, Result};

/// Relinking sources into the CMake lists is declared but not available yet.
pub fn update_links() -> Result<()> {
    Err(DevtoolError::NotImplemented("update-links"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_links_is_not_implemented() {
        let err = update_links().unwrap_err();
        assert!(matches!(err, DevtoolError::NotImplemented("update-links")));
        assert_eq!(err.to_string(), "update-links is not implemented yet.");
    }
}
