use axum::extract::{Json, State};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use super::model::DeleteAccountResponse;
use crate::{
    AppState,
    error::AppError,
    supabase::{PROFILE_PICTURES_BUCKET, SupabaseClient, SupabaseError},
};

#[axum::debug_handler]
pub async fn delete_account(
    State(state): State<AppState>,
    auth: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
) -> Result<Json<DeleteAccountResponse>, AppError> {
    let authorization = match auth {
        Ok(TypedHeader(authorization)) => authorization,
        Err(e) if e.is_missing() => {
            return Err(AppError::Unauthorized(
                "Missing authorization header".into(),
            ));
        }
        // 非 Bearer 凭证
        Err(_) => return Err(AppError::Unauthorized("Unauthorized".into())),
    };
    let supabase = &state.supabase;
    if !supabase.is_configured() {
        return Err(AppError::NotConfigured("Supabase not configured".into()));
    }

    let user = supabase.get_user(authorization.token()).await.map_err(|e| {
        tracing::warn!("Rejected account deletion: {}", e);
        AppError::Unauthorized("Unauthorized".into())
    })?;

    tracing::info!("Deleting account for user: {}", user.id);

    // 头像删除失败不影响账户删除
    match remove_profile_pictures(supabase, &user.id).await {
        Ok(0) => {}
        Ok(n) => tracing::info!("Deleted {} storage files", n),
        Err(e) => tracing::error!("Storage deletion error (non-critical): {}", e),
    }

    supabase.delete_profile(&user.id).await.map_err(|e| {
        tracing::error!("Error deleting user profile: {}", e);
        AppError::Upstream("Failed to delete user profile".into())
    })?;
    tracing::info!("Deleted user profile from database");

    // 认证用户必须最后删除
    supabase.delete_auth_user(&user.id).await.map_err(|e| {
        tracing::error!("Error deleting auth user: {}", e);
        AppError::Upstream("Failed to delete authentication user".into())
    })?;
    tracing::info!("Deleted auth user successfully");

    Ok(Json(DeleteAccountResponse::done()))
}

async fn remove_profile_pictures(
    supabase: &SupabaseClient,
    user_id: &str,
) -> Result<usize, SupabaseError> {
    let files = supabase
        .list_objects(PROFILE_PICTURES_BUCKET, user_id)
        .await?;
    if files.is_empty() {
        return Ok(0);
    }

    let paths: Vec<String> = files
        .iter()
        .map(|f| format!("{}/{}", user_id, f.name))
        .collect();
    supabase
        .remove_objects(PROFILE_PICTURES_BUCKET, &paths)
        .await?;
    Ok(paths.len())
}
