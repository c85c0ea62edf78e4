//! Credential management tools.

use crate::credentials::CredentialStore;
use crate::interfaces::error::ToolError;
use crate::tools::request::RequestSpec;
use crate::tools::validator::{Args, Field};
use crate::tools::{Auth, BuildContext, OnSuccess, ToolSpec};

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::local(
            "set_token",
            "set token",
            "Store the Lichess API token used for authenticated calls. Replaces any previous token.",
            set_token,
        )
        .fields(vec![Field::string("token", "Personal API access token")
            .required()
            .non_empty()]),
        ToolSpec::remote(
            "test_tokens",
            "test tokens",
            "Check which of the given tokens are valid and list their scopes. Sent without the stored token.",
            Auth::Anonymous,
            |args, _| Ok(RequestSpec::post("/api/token/test").text(args.str("tokens")?)),
        )
        .fields(vec![Field::string(
            "tokens",
            "Comma-separated list of up to 1000 tokens",
        )
        .required()]),
        ToolSpec::remote(
            "revoke_token",
            "revoke token",
            "Revoke the stored token on Lichess and forget it locally once the revocation succeeds.",
            Auth::Anonymous,
            revoke_token,
        )
        .on_success(OnSuccess::ClearCredential),
    ]
}

fn set_token(args: &Args, store: &CredentialStore) -> Result<String, ToolError> {
    if !store.set(args.str("token")?) {
        return Err(ToolError::validation("Argument 'token' must not be empty"));
    }
    Ok("Lichess token set.".to_string())
}

/// The revoked token travels as an explicit header built from the snapshot
/// the gateway clears afterwards, not through the default bearer channel.
fn revoke_token(_args: &Args, ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let token = ctx.token.ok_or_else(ToolError::missing_credential)?;
    Ok(RequestSpec::delete("/api/token").header("Authorization", format!("Bearer {}", token)))
}
