//! User lookups, leaderboards and relations.

use super::{username, PERF_TYPES, USER_PERF_TYPES};
use crate::tools::request::{FormPairs, RequestSpec};
use crate::tools::validator::Field;
use crate::tools::{Auth, ToolSpec};

pub fn tools() -> Vec<ToolSpec> {
    let mut tools = vec![
        ToolSpec::remote(
            "get_user_profile",
            "fetch user profile",
            "Public profile of a Lichess user: ratings, play time, counts and profile text.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .query_opt("trophies", args.opt_bool("trophies")))
            },
        )
        .fields(vec![
            username("Lichess username"),
            Field::boolean("trophies", "Include user trophies"),
        ])
        .resource("user", "username"),
        ToolSpec::remote(
            "get_users_by_ids",
            "fetch users by id",
            "Public data of up to 300 users in one call.",
            Auth::Optional,
            |args, _| Ok(RequestSpec::post("/api/users").text(args.str("usernames")?)),
        )
        .fields(vec![Field::string("usernames", "Comma-separated usernames").required()]),
        ToolSpec::remote(
            "get_user_status",
            "fetch user status",
            "Online, playing and streaming flags for up to 100 users.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/users/status")
                    .query("ids", args.str("ids")?)
                    .query_opt("withGameIds", args.opt_bool("with_game_ids")))
            },
        )
        .fields(vec![
            Field::string("ids", "Comma-separated user ids").required(),
            Field::boolean("with_game_ids", "Include ids of ongoing games"),
        ]),
        ToolSpec::remote(
            "get_all_top_10",
            "fetch top 10 players",
            "Top 10 players for each speed and variant.",
            Auth::Optional,
            |_, _| Ok(RequestSpec::get("/api/player")),
        ),
        ToolSpec::remote(
            "get_leaderboard",
            "fetch leaderboard",
            "Leaderboard of a single speed or variant.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/player/top")
                    .segment(args.int("nb")?.to_string())
                    .segment(args.str("perf_type")?))
            },
        )
        .fields(vec![
            Field::string("perf_type", "Speed or variant").required().one_of(PERF_TYPES),
            Field::integer("nb", "Number of players").range(1, 200).default_int(10),
        ]),
        ToolSpec::remote(
            "get_user_performance",
            "fetch user performance",
            "Detailed performance statistics of a user in one speed or variant.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .then("perf")
                    .segment(args.str("perf_type")?))
            },
        )
        .fields(vec![
            username("Lichess username"),
            Field::string("perf_type", "Speed or variant").required().one_of(USER_PERF_TYPES),
        ])
        .resource("user", "username"),
        ToolSpec::remote(
            "get_crosstable",
            "fetch crosstable",
            "Total number of games and score between two users.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/crosstable")
                    .segment(args.str("user1")?)
                    .segment(args.str("user2")?)
                    .query_opt("matchup", args.opt_bool("matchup")))
            },
        )
        .fields(vec![
            Field::string("user1", "First username").required().identifier(),
            Field::string("user2", "Second username").required().identifier(),
            Field::boolean("matchup", "Include the current match data if any"),
        ]),
        ToolSpec::remote(
            "autocomplete_usernames",
            "autocomplete usernames",
            "Usernames starting with the given term.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/player/autocomplete")
                    .query("term", args.str("term")?)
                    .query_opt("object", args.opt_bool("object"))
                    .query_opt("friend", args.opt_bool("friend")))
            },
        )
        .fields(vec![
            Field::string("term", "Beginning of a username, at least 3 characters").required(),
            Field::boolean("object", "Return user objects instead of plain names"),
            Field::boolean("friend", "Only followed players"),
        ]),
    ];

    tools.extend(user_history_tools());
    tools.extend(relation_tools());
    tools
}

fn user_history_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "get_user_activity",
            "fetch user activity",
            "Recent activity feed of a user.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .then("activity"))
            },
        )
        .fields(vec![username("Lichess username")])
        .resource("user", "username"),
        ToolSpec::remote(
            "get_user_rating_history",
            "fetch rating history",
            "Rating history of a user for every speed and variant.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .then("rating-history"))
            },
        )
        .fields(vec![username("Lichess username")])
        .resource("user", "username"),
    ]
}

fn relation_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "get_user_note",
            "fetch user note",
            "Private notes you wrote about a user.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .then("note"))
            },
        )
        .fields(vec![username("Lichess username")])
        .resource("user", "username"),
        ToolSpec::remote(
            "add_user_note",
            "add user note",
            "Add a private note about a user.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::post("/api/user")
                    .segment(args.str("username")?)
                    .then("note")
                    .form(FormPairs::new().push("text", args.str("text")?).into_pairs()))
            },
        )
        .fields(vec![
            username("Lichess username"),
            Field::string("text", "Note contents").required(),
        ])
        .resource("user", "username"),
        ToolSpec::remote(
            "follow_user",
            "follow user",
            "Follow a player.",
            Auth::Required,
            |args, _| Ok(RequestSpec::post("/api/rel/follow").segment(args.str("username")?)),
        )
        .fields(vec![username("Player to follow")])
        .resource("user", "username"),
        ToolSpec::remote(
            "unfollow_user",
            "unfollow user",
            "Stop following a player.",
            Auth::Required,
            |args, _| Ok(RequestSpec::post("/api/rel/unfollow").segment(args.str("username")?)),
        )
        .fields(vec![username("Player to unfollow")])
        .resource("user", "username"),
        ToolSpec::remote(
            "block_user",
            "block user",
            "Block a player.",
            Auth::Required,
            |args, _| Ok(RequestSpec::post("/api/rel/block").segment(args.str("username")?)),
        )
        .fields(vec![username("Player to block")])
        .resource("user", "username"),
        ToolSpec::remote(
            "unblock_user",
            "unblock user",
            "Unblock a player.",
            Auth::Required,
            |args, _| Ok(RequestSpec::post("/api/rel/unblock").segment(args.str("username")?)),
        )
        .fields(vec![username("Player to unblock")])
        .resource("user", "username"),
        ToolSpec::remote(
            "send_message",
            "send message",
            "Send a private message to another player.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::post("/inbox")
                    .segment(args.str("username")?)
                    .form(FormPairs::new().push("text", args.str("text")?).into_pairs()))
            },
        )
        .fields(vec![
            username("Recipient"),
            Field::string("text", "Message text").required(),
        ])
        .resource("user", "username"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::error::{ErrorKind, ToolError};
    use crate::tools::catalog::build_request;
    use crate::tools::request::{HttpMethod, RequestBody};
    use serde_json::{json, Value};

    fn build(name: &str, raw: Value) -> Result<RequestSpec, ToolError> {
        build_request(tools(), name, raw, None)
    }

    #[test]
    fn test_profile_path_and_optional_query() {
        let request = build("get_user_profile", json!({"username": "thibault"})).unwrap();
        assert_eq!(request.path(), "/api/user/thibault");
        assert!(request.query.is_empty());

        let request =
            build("get_user_profile", json!({"username": "thibault", "trophies": true})).unwrap();
        assert_eq!(request.query_value("trophies"), Some("true"));
    }

    #[test]
    fn test_leaderboard_bounds() {
        let err = build("get_leaderboard", json!({"perf_type": "blitz", "nb": 500})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let request = build("get_leaderboard", json!({"perf_type": "blitz", "nb": 200})).unwrap();
        assert_eq!(request.path(), "/api/player/top/200/blitz");
    }

    #[test]
    fn test_leaderboard_rejects_unknown_perf() {
        let err = build("get_leaderboard", json!({"perf_type": "correspondence"})).unwrap_err();
        assert!(err.message.contains("perf_type"));
    }

    #[test]
    fn test_users_by_ids_is_plain_text() {
        let request = build("get_users_by_ids", json!({"usernames": "a,b,c"})).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, RequestBody::Text("a,b,c".into()));
    }

    #[test]
    fn test_send_message_is_form_encoded() {
        let request = build("send_message", json!({"username": "bob", "text": "hi"})).unwrap();
        assert_eq!(request.path(), "/inbox/bob");
        assert_eq!(
            request.body,
            RequestBody::Form(vec![("text".into(), "hi".into())])
        );
    }

    #[test]
    fn test_relations_require_auth() {
        for name in ["follow_user", "unfollow_user", "block_user", "unblock_user", "send_message"] {
            let tool = tools().into_iter().find(|t| t.name == name).unwrap();
            assert_eq!(tool.auth, Auth::Required, "{}", name);
        }
    }
}
