use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::{validate_email, validate_name};

/// Request body for profile updates; both fields are required.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "Chihiro")]
    pub name: String,
    #[schema(example = "chihiro@example.com")]
    pub email: String,
}

pub fn validate_update_profile(payload: &UpdateProfileRequest) -> Result<(), AppError> {
    validate_name(&payload.name)?;
    validate_email(&payload.email)
}

/// Response after a successful avatar upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarResponse {
    /// URL the new avatar is served from.
    #[schema(example = "/api/v1/avatars/3e1f...c0a8.png")]
    pub url: String,
}
