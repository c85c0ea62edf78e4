//! Challenges: creating, answering and listing.

use serde_json::{json, Value};

use super::{clock_fields, clock_seconds, id8, put_opt, username, variant, CLOCK_TOGETHER, COLORS, CORRESPONDENCE_DAYS};
use crate::interfaces::error::ToolError;
use crate::tools::request::{FormPairs, RequestSpec};
use crate::tools::validator::{Args, Check, Field};
use crate::tools::{Auth, BuildContext, ToolSpec};

const DECLINE_REASONS: &[&str] = &[
    "generic",
    "later",
    "tooFast",
    "tooSlow",
    "timeControl",
    "rated",
    "casual",
    "standard",
    "variant",
    "noBot",
    "onlyBot",
];

const CLOCK_OR_DAYS: Check = Check::Exclusive(&["clock", "days"]);

/// Time control, color, variant and position shared by every challenge kind.
fn game_setup_fields(with_color: bool) -> Vec<Field> {
    let mut fields = clock_fields("Real-time clock; omit for correspondence or unlimited");
    fields.push(
        Field::integer("days", "Days per move for correspondence").one_of(CORRESPONDENCE_DAYS),
    );
    if with_color {
        fields.push(
            Field::string("color", "Color to play")
                .one_of(COLORS)
                .default_str("random"),
        );
    }
    fields.push(variant());
    fields.push(Field::string("fen", "Custom initial position (FEN)"));
    fields
}

fn game_setup_body(args: &Args) -> Value {
    let mut body = json!({});
    put_opt(&mut body, "clock", clock_seconds(args));
    put_opt(&mut body, "days", args.opt_int("days").map(Value::from));
    put_opt(&mut body, "color", args.opt_str("color").map(Value::from));
    put_opt(&mut body, "variant", args.opt_str("variant").map(Value::from));
    put_opt(&mut body, "fen", args.opt_str("fen").map(Value::from));
    body
}

fn challenge_id() -> Field {
    id8("challenge_id", "Eight-character challenge id")
}

fn challenge_action(args: &Args, suffix: &str) -> Result<RequestSpec, ToolError> {
    Ok(RequestSpec::post("/api/challenge")
        .segment(args.str("challenge_id")?)
        .then(suffix))
}

pub fn tools() -> Vec<ToolSpec> {
    let mut create_fields = vec![
        username("Player to challenge"),
        Field::boolean("rated", "Rated game").default_bool(false),
    ];
    create_fields.extend(game_setup_fields(true));

    let mut ai_fields = vec![Field::integer("level", "Stockfish level")
        .required()
        .range(1, 8)];
    ai_fields.extend(game_setup_fields(true));

    let mut open_fields = vec![
        Field::boolean("rated", "Rated game").default_bool(false),
        Field::string("name", "Optional name shown on the challenge page"),
    ];
    open_fields.extend(game_setup_fields(false));

    vec![
        ToolSpec::remote(
            "list_challenges",
            "list challenges",
            "Incoming and outgoing challenges of the logged-in user.",
            Auth::Required,
            |_, _| Ok(RequestSpec::get("/api/challenge")),
        ),
        ToolSpec::remote(
            "create_challenge",
            "create challenge",
            "Challenge another player. The clock limit is given in minutes and sent as seconds.",
            Auth::Required,
            create_challenge,
        )
        .fields(create_fields)
        .checks(vec![CLOCK_TOGETHER, CLOCK_OR_DAYS])
        .resource("user", "username"),
        ToolSpec::remote(
            "challenge_ai",
            "challenge AI",
            "Start a game against the Lichess AI.",
            Auth::Required,
            challenge_ai,
        )
        .fields(ai_fields)
        .checks(vec![CLOCK_TOGETHER, CLOCK_OR_DAYS]),
        ToolSpec::remote(
            "create_open_challenge",
            "create open challenge",
            "Create a challenge that any two players can join through its URL.",
            Auth::Optional,
            create_open_challenge,
        )
        .fields(open_fields)
        .checks(vec![CLOCK_TOGETHER, CLOCK_OR_DAYS]),
        ToolSpec::remote(
            "accept_challenge",
            "accept challenge",
            "Accept an incoming challenge.",
            Auth::Required,
            |args, _| challenge_action(args, "accept"),
        )
        .fields(vec![challenge_id()])
        .resource("challenge", "challenge_id"),
        ToolSpec::remote(
            "decline_challenge",
            "decline challenge",
            "Decline an incoming challenge, optionally giving a reason.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new().push("reason", args.str("reason")?);
                Ok(challenge_action(args, "decline")?.form(form.into_pairs()))
            },
        )
        .fields(vec![
            challenge_id(),
            Field::string("reason", "Reason shown to the challenger")
                .one_of(DECLINE_REASONS)
                .default_str("generic"),
        ])
        .resource("challenge", "challenge_id"),
        ToolSpec::remote(
            "cancel_challenge",
            "cancel challenge",
            "Cancel a challenge you sent.",
            Auth::Required,
            |args, _| challenge_action(args, "cancel"),
        )
        .fields(vec![challenge_id()])
        .resource("challenge", "challenge_id"),
    ]
}

fn create_challenge(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let mut body = game_setup_body(args);
    put_opt(&mut body, "rated", Some(Value::from(args.bool("rated")?)));
    Ok(RequestSpec::post("/api/challenge")
        .segment(args.str("username")?)
        .json(body))
}

fn challenge_ai(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let mut body = game_setup_body(args);
    put_opt(&mut body, "level", Some(Value::from(args.int("level")?)));
    Ok(RequestSpec::post("/api/challenge/ai").json(body))
}

fn create_open_challenge(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let mut body = game_setup_body(args);
    put_opt(&mut body, "rated", Some(Value::from(args.bool("rated")?)));
    put_opt(&mut body, "name", args.opt_str("name").map(Value::from));
    Ok(RequestSpec::post("/api/challenge/open").json(body))
}
