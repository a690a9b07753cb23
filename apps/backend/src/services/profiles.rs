use tracing::debug;

use crate::db::Db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::logging::pii::Redacted;
use crate::models::{Profile, Role};

/// Fetch the current user's profile row.
pub async fn me(db: &Db, user: &CurrentUser) -> Result<Profile, AppError> {
    db.from("profiles")
        .select("*")
        .eq("id", &user.id)
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::ProfileNotFound,
                format!("No profile for user {}", user.id),
            )
        })
}

/// Update the current user's display name.
pub async fn update_display_name(
    db: &Db,
    user: &CurrentUser,
    display_name: String,
) -> Result<Profile, AppError> {
    let display_name = display_name.trim().to_string();
    if display_name.is_empty() {
        return Err(AppError::invalid("Display name cannot be empty"));
    }

    debug!(user_id = %Redacted(&user.id), "updating display name");

    db.from("profiles")
        .eq("id", &user.id)
        .update(&serde_json::json!({ "display_name": display_name }))
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::ProfileNotFound,
                format!("No profile for user {}", user.id),
            )
        })
}

/// Role held by a user; a missing profile surfaces as `PROFILE_NOT_FOUND`.
pub async fn role_of(db: &Db, user_id: &str) -> Result<Role, AppError> {
    let profile: Profile = db
        .from("profiles")
        .select("*")
        .eq("id", user_id)
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::ProfileNotFound,
                format!("No profile for user {user_id}"),
            )
        })?;
    Ok(profile.role)
}

/// Require a role for the operation. Operators satisfy any requirement.
pub async fn require_role(db: &Db, user_id: &str, required: Role) -> Result<Role, AppError> {
    let role = role_of(db, user_id).await?;
    if role == required || role == Role::Operator {
        return Ok(role);
    }
    Err(AppError::insufficient_role(format!(
        "Requires the {} role",
        required.as_str()
    )))
}
