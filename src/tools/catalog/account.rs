//! Tools for the authenticated account (`/api/account/*`).

use crate::tools::request::RequestSpec;
use crate::tools::validator::Field;
use crate::tools::{Auth, ToolSpec};

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "get_my_profile",
            "fetch your profile",
            "Public information about the logged-in user.",
            Auth::Required,
            |_, _| Ok(RequestSpec::get("/api/account")),
        ),
        ToolSpec::remote(
            "get_my_email",
            "fetch your email address",
            "Read the email address of the logged-in user.",
            Auth::Required,
            |_, _| Ok(RequestSpec::get("/api/account/email")),
        ),
        ToolSpec::remote(
            "get_my_preferences",
            "fetch your preferences",
            "Read the preferences of the logged-in user.",
            Auth::Required,
            |_, _| Ok(RequestSpec::get("/api/account/preferences")),
        ),
        ToolSpec::remote(
            "get_kid_mode",
            "fetch kid mode status",
            "Read the kid mode status of the logged-in user.",
            Auth::Required,
            |_, _| Ok(RequestSpec::get("/api/account/kid")),
        ),
        ToolSpec::remote(
            "set_kid_mode",
            "set kid mode",
            "Enable or disable kid mode for the logged-in user.",
            Auth::Required,
            |args, _| Ok(RequestSpec::post("/api/account/kid").query("v", args.bool("enabled")?)),
        )
        .fields(vec![Field::boolean("enabled", "Whether kid mode should be on").required()]),
        ToolSpec::remote(
            "get_my_ongoing_games",
            "fetch your ongoing games",
            "Ongoing games of the logged-in user, most urgent first.",
            Auth::Required,
            |args, _| Ok(RequestSpec::get("/api/account/playing").query("nb", args.int("nb")?)),
        )
        .fields(vec![Field::integer("nb", "Maximum number of games")
            .range(1, 50)
            .default_int(9)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::build_request;
    use crate::tools::request::HttpMethod;
    use serde_json::json;

    fn build(name: &str, raw: serde_json::Value) -> RequestSpec {
        build_request(tools(), name, raw, None).unwrap()
    }

    #[test]
    fn test_all_account_tools_require_auth() {
        assert!(tools().iter().all(|t| t.auth == Auth::Required));
    }

    #[test]
    fn test_set_kid_mode_query() {
        let request = build("set_kid_mode", json!({"enabled": false}));
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path(), "/api/account/kid");
        assert_eq!(request.query_value("v"), Some("false"));
    }

    #[test]
    fn test_ongoing_games_default_nb() {
        let request = build("get_my_ongoing_games", json!({}));
        assert_eq!(request.query_value("nb"), Some("9"));
    }
}
