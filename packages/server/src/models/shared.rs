use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 10)]
    pub limit: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 24)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// Shared query shape for paginated list endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// Page number, 1-based. Defaults to 1.
    pub page: Option<u64>,
    /// Items per page, clamped to 1-100.
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Resolve raw query values into a validated (page, limit) pair.
    ///
    /// The page is capped so that `(page - 1) * limit` always fits a
    /// signed 64-bit offset.
    pub fn resolve(&self, default_limit: u64) -> (u64, u64) {
        let page = self.page.unwrap_or(1).clamp(1, i64::MAX as u64 / 100);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        (page, limit)
    }
}

/// Validate a display name (2-50 Unicode characters after trimming).
pub fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err(AppError::Validation("Name must be 2-50 characters".into()));
    }
    Ok(())
}

/// Validate an email address (shape check plus 100-character cap).
///
/// Deliverability is not our problem; this only rejects strings that
/// cannot possibly be addresses.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || email.chars().count() > 100 {
        return Err(AppError::Validation("Email must be 1-100 characters".into()));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::Validation("Invalid email address".into()));
    };
    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.contains(char::is_whitespace)
    {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    Ok(())
}

/// Validate a password (6-100 bytes).
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 6 || password.len() > 100 {
        return Err(AppError::Validation(
            "Password must be 6-100 characters".into(),
        ));
    }
    Ok(())
}

/// Lowercase and trim an email for storage and lookups, so
/// `Sophie@Example.com` and `sophie@example.com` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
