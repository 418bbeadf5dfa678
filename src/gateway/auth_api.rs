//! Identity-provider endpoints under `/auth/v1/`.
//!
//! Credentials are never stored or compared locally: sign-in delegates to
//! the provider's password grant, and session restore just asks the
//! provider who the persisted access token belongs to.

use crate::errors::{Error, Result};
use crate::gateway::Rest;
use crate::gateway::rest::check;
use crate::models::{AuthSession, AuthUser};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WireSession {
    access_token: String,
    refresh_token: String,
    user: WireUser,
}

fn to_auth_user(user: WireUser) -> AuthUser {
    let name = user
        .user_metadata
        .get("name")
        .or_else(|| user.user_metadata.get("full_name"))
        .and_then(|value| value.as_str())
        .map(str::to_string);

    AuthUser {
        id: user.id,
        email: user.email.unwrap_or_default(),
        name,
    }
}

/// Signs in with the provider's password grant.
///
/// A 4xx answer means the credentials were not accepted and maps to
/// [`Error::InvalidCredentials`]; anything else is a backend error.
#[instrument(skip(rest, password))]
pub async fn sign_in_with_password(
    rest: &Rest,
    email: &str,
    password: &str,
) -> Result<AuthSession> {
    let response = rest
        .prepare(rest.http.post(rest.auth_url("token")))
        .query(&[("grant_type", "password")])
        .json(&serde_json::json!({ "email": email.trim(), "password": password }))
        .send()
        .await?;

    if response.status().is_client_error() {
        return Err(Error::InvalidCredentials);
    }
    let session: WireSession = check(response).await?.json().await?;

    Ok(AuthSession {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        user: to_auth_user(session.user),
    })
}

/// Resolves the user a previously issued access token belongs to.
#[instrument(skip(rest, access_token))]
pub async fn get_user(rest: &Rest, access_token: &str) -> Result<AuthUser> {
    let response = rest
        .http
        .get(rest.auth_url("user"))
        .header("apikey", &rest.api_key)
        .header("Authorization", format!("Bearer {access_token}"))
        .send()
        .await?;
    let user: WireUser = check(response).await?.json().await?;
    Ok(to_auth_user(user))
}

/// Invalidates the remote session for the given access token.
#[instrument(skip(rest, access_token))]
pub async fn sign_out(rest: &Rest, access_token: &str) -> Result<()> {
    let response = rest
        .http
        .post(rest.auth_url("logout"))
        .header("apikey", &rest.api_key)
        .header("Authorization", format!("Bearer {access_token}"))
        .send()
        .await?;
    check(response).await?;
    Ok(())
}
