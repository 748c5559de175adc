use crate::utils::error::{ConstructionError, ExchangeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExchangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExchangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExchangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 參與者名稱同時也是輸出檔名 (`<name>.txt`)，因此不可含有路徑分隔符號
pub fn validate_participant_name(name: &str) -> std::result::Result<(), ConstructionError> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty or whitespace-only")
    } else if name.contains('\0') {
        Some("name contains null bytes")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else if name == "." || name == ".." {
        Some("name cannot be a relative path component")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConstructionError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
