//! Puzzles and Puzzle Storm.

use super::username;
use crate::tools::request::{RequestSpec, NDJSON};
use crate::tools::validator::Field;
use crate::tools::{Auth, ToolSpec};

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "get_daily_puzzle",
            "fetch daily puzzle",
            "The daily Lichess puzzle.",
            Auth::Optional,
            |_, _| Ok(RequestSpec::get("/api/puzzle/daily")),
        ),
        ToolSpec::remote(
            "get_puzzle",
            "fetch puzzle",
            "A single puzzle by id.",
            Auth::Optional,
            |args, _| Ok(RequestSpec::get("/api/puzzle").segment(args.str("puzzle_id")?)),
        )
        .fields(vec![Field::string("puzzle_id", "Five-character puzzle id")
            .required()
            .length(5)
            .identifier()])
        .resource("puzzle", "puzzle_id"),
        ToolSpec::remote(
            "get_puzzle_activity",
            "fetch puzzle activity",
            "Your puzzle history, most recent first.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::get("/api/puzzle/activity")
                    .query_opt("max", args.opt_int("max"))
                    .query_opt("before", args.opt_int("before"))
                    .accept(NDJSON))
            },
        )
        .fields(vec![
            Field::integer("max", "Maximum number of entries").range(1, 200),
            Field::integer("before", "Only entries before this timestamp (ms)"),
        ]),
        ToolSpec::remote(
            "get_puzzle_dashboard",
            "fetch puzzle dashboard",
            "Your puzzle results aggregated by theme over the last days.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::get("/api/puzzle/dashboard").segment(args.int("days")?.to_string()))
            },
        )
        .fields(vec![Field::integer("days", "How many days to look back")
            .range(1, 90)
            .default_int(30)]),
        ToolSpec::remote(
            "get_storm_dashboard",
            "fetch storm dashboard",
            "Puzzle Storm high scores and daily history of a player.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/storm/dashboard")
                    .segment(args.str("username")?)
                    .query("days", args.int("days")?))
            },
        )
        .fields(vec![
            username("Player"),
            Field::integer("days", "How many days of history to return")
                .range(0, 365)
                .default_int(30),
        ])
        .resource("user", "username"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::error::{ErrorKind, ToolError};
    use crate::tools::catalog::build_request;
    use serde_json::{json, Value};

    fn build(name: &str, raw: Value) -> Result<RequestSpec, ToolError> {
        build_request(tools(), name, raw, Some("lip_test"))
    }

    #[test]
    fn test_puzzle_id_length() {
        let err = build("get_puzzle", json!({"puzzle_id": "abcdef"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(err.message.contains("exactly 5 characters (got 6)"));

        let request = build("get_puzzle", json!({"puzzle_id": "K69di"})).unwrap();
        assert_eq!(request.path(), "/api/puzzle/K69di");
    }

    #[test]
    fn test_dashboard_default_days() {
        let request = build("get_puzzle_dashboard", json!({})).unwrap();
        assert_eq!(request.path(), "/api/puzzle/dashboard/30");

        let err = build("get_puzzle_dashboard", json!({"days": 91})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_storm_days_query() {
        let request = build("get_storm_dashboard", json!({"username": "alice", "days": 0})).unwrap();
        assert_eq!(request.path(), "/api/storm/dashboard/alice");
        assert_eq!(request.query_value("days"), Some("0"));
    }

    #[test]
    fn test_activity_is_ndjson() {
        let request = build("get_puzzle_activity", json!({"max": 20})).unwrap();
        assert_eq!(request.header_value("Accept"), Some(NDJSON));
        assert_eq!(request.query_value("max"), Some("20"));
        assert!(request.query_value("before").is_none());
    }
}
