//! Wrappers for the backend auth endpoints. These keep the paths and payload
//! shapes in one place; callers attribute failures to a flow.

use crate::{
    api::ApiClient,
    auth::types::{CreatedAccount, Identity, SigninRequest, SignupRequest},
    errors::AppError,
};

pub const SIGNUP_PATH: &str = "/auth/signup";
pub const SIGNIN_PATH: &str = "/auth/signin";

/// Creates an account. Does not sign the user in.
///
/// # Errors
/// Returns the raw `AppError` from the HTTP layer.
pub async fn signup(api: &ApiClient, request: &SignupRequest) -> Result<CreatedAccount, AppError> {
    api.post_json_value(SIGNUP_PATH, request)
        .await
        .map(CreatedAccount::from)
}

/// Authenticates and returns the identity fields of the response; anything
/// else the backend sends, tokens included, is dropped.
///
/// # Errors
/// Returns the raw `AppError` from the HTTP layer.
pub async fn signin(api: &ApiClient, request: &SigninRequest) -> Result<Identity, AppError> {
    api.post_json(SIGNIN_PATH, request).await
}
