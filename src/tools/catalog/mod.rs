//! The Lichess tool catalogue.
//!
//! Each submodule contributes the tools for one API area. Shared argument
//! descriptors and enumerations live here so that, for example, every game
//! id is validated the same way.

pub mod account;
pub mod board;
pub mod challenges;
pub mod games;
pub mod puzzles;
pub mod studies;
pub mod teams;
pub mod tokens;
pub mod tournaments;
pub mod users;

use serde_json::{json, Value};

use super::request::{JSON, NDJSON, PGN};
use super::validator::{Args, Check, Field};
use super::ToolSpec;

/// Every tool, in the order they are advertised.
pub fn all_tools() -> Vec<ToolSpec> {
    let mut tools = Vec::new();
    tools.extend(tokens::tools());
    tools.extend(account::tools());
    tools.extend(users::tools());
    tools.extend(games::tools());
    tools.extend(board::tools());
    tools.extend(challenges::tools());
    tools.extend(tournaments::tools());
    tools.extend(studies::tools());
    tools.extend(puzzles::tools());
    tools.extend(teams::tools());
    tools
}

pub const PERF_TYPES: &[&str] = &[
    "ultraBullet",
    "bullet",
    "blitz",
    "rapid",
    "classical",
    "chess960",
    "crazyhouse",
    "antichess",
    "atomic",
    "horde",
    "kingOfTheHill",
    "racingKings",
    "threeCheck",
];

pub const USER_PERF_TYPES: &[&str] = &[
    "ultraBullet",
    "bullet",
    "blitz",
    "rapid",
    "classical",
    "correspondence",
    "chess960",
    "crazyhouse",
    "antichess",
    "atomic",
    "horde",
    "kingOfTheHill",
    "racingKings",
    "threeCheck",
];

pub const VARIANTS: &[&str] = &[
    "standard",
    "chess960",
    "crazyhouse",
    "antichess",
    "atomic",
    "horde",
    "kingOfTheHill",
    "racingKings",
    "threeCheck",
    "fromPosition",
];

pub const COLORS: &[&str] = &["random", "white", "black"];

pub const CORRESPONDENCE_DAYS: &[&str] = &["1", "2", "3", "5", "7", "10", "14"];

/// Single-game export encodings.
pub const GAME_FORMATS: &[&str] = &["pgn", "json"];

/// Multi-game export encodings.
pub const STREAM_FORMATS: &[&str] = &["pgn", "ndjson"];

pub fn username(description: &'static str) -> Field {
    Field::string("username", description).required().identifier()
}

/// Required eight-character id such as a game, tournament or study id.
pub fn id8(name: &'static str, description: &'static str) -> Field {
    Field::string(name, description)
        .required()
        .length(8)
        .identifier()
}

pub fn game_id() -> Field {
    id8("game_id", "Eight-character game id")
}

pub fn team_id() -> Field {
    Field::string("team_id", "Team id (the slug from the team URL)")
        .required()
        .identifier()
}

pub fn variant() -> Field {
    Field::string("variant", "Chess variant").one_of(VARIANTS)
}

/// `clock` object with a limit in minutes and an increment in seconds.
pub fn clock_fields(description: &'static str) -> Vec<Field> {
    vec![
        Field::object("clock", description),
        Field::number("clock.limit", "Initial time in minutes (0.25 steps allowed)").range(0, 180),
        Field::integer("clock.increment", "Increment in seconds").range(0, 180),
    ]
}

pub const CLOCK_TOGETHER: Check = Check::Together(&["clock.limit", "clock.increment"]);

/// Convert the caller's `clock` (limit in minutes) into the API's
/// `{limit, increment}` in seconds. The one place minutes become seconds.
pub fn clock_seconds(args: &Args) -> Option<Value> {
    let minutes = args.opt_number("clock.limit")?;
    let increment = args.opt_int("clock.increment")?;
    Some(json!({
        "limit": (minutes * 60.0).round() as i64,
        "increment": increment,
    }))
}

/// `Accept` header for an export format.
pub fn accept_for(format: &str) -> &'static str {
    match format {
        "json" => JSON,
        "ndjson" => NDJSON,
        _ => PGN,
    }
}

/// Insert `value` into a JSON body under `key` only when present.
pub fn put_opt(body: &mut Value, key: &str, value: Option<Value>) {
    if let (Some(value), Some(object)) = (value, body.as_object_mut()) {
        object.insert(key.to_string(), value);
    }
}

/// Validate `raw` and run the named tool's build function.
#[cfg(test)]
pub(crate) fn build_request(
    tools: Vec<ToolSpec>,
    name: &str,
    raw: Value,
    token: Option<&str>,
) -> Result<super::request::RequestSpec, crate::interfaces::error::ToolError> {
    let tool = tools
        .into_iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no tool named {}", name));
    let args = tool.validate(raw)?;
    match tool.operation {
        super::Operation::Remote { build, .. } => build(&args, &super::BuildContext { token }),
        super::Operation::Local(_) => panic!("{} is a local tool", name),
    }
}
