use crate::domain::error::DomainError;

/// Centralized domain validation.
///
/// All identity checks live here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Trim and check a project name. Returns the trimmed name.
    pub fn validate_project_name(raw: &str) -> Result<String, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "project_name",
            });
        }

        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.len() > 214 {
            return Err(invalid("longer than 214 characters"));
        }
        if name.starts_with(['.', '_', '-']) {
            return Err(invalid("must start with a letter or digit"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(invalid(&format!("contains '{c}'")));
        }
        Ok(name.to_string())
    }

    /// Check a Go module path. Returns the trimmed path.
    pub fn validate_module_path(raw: &str) -> Result<String, DomainError> {
        let path = raw.trim();
        if path.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "module_path",
            });
        }

        let invalid = |reason: &str| DomainError::InvalidModulePath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.starts_with('/') || path.ends_with('/') {
            return Err(invalid("must not start or end with '/'"));
        }
        if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(invalid("contains an empty or relative segment"));
        }
        if let Some(c) = path
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '/')))
        {
            return Err(invalid(&format!("contains '{c}'")));
        }
        Ok(path.to_string())
    }
}
