//! Arena tournaments, Swiss tournaments and simuls.

use serde_json::{json, Value};

use super::{
    accept_for, clock_fields, clock_seconds, id8, put_opt, team_id, username, variant,
    CLOCK_TOGETHER, STREAM_FORMATS,
};
use crate::interfaces::error::ToolError;
use crate::tools::request::{FormPairs, RequestSpec, NDJSON, TEXT};
use crate::tools::validator::{Args, Field};
use crate::tools::{Auth, BuildContext, ToolSpec};

fn tournament_id() -> Field {
    id8("tournament_id", "Eight-character arena tournament id")
}

fn swiss_id() -> Field {
    id8("swiss_id", "Eight-character Swiss tournament id")
}

fn arena(args: &Args) -> Result<RequestSpec, ToolError> {
    Ok(RequestSpec::post("/api/tournament").segment(args.str("tournament_id")?))
}

fn swiss(args: &Args) -> Result<RequestSpec, ToolError> {
    Ok(RequestSpec::post("/api/swiss").segment(args.str("swiss_id")?))
}

fn opt_value<T: Into<Value>>(value: Option<T>) -> Option<Value> {
    value.map(Into::into)
}

pub fn tools() -> Vec<ToolSpec> {
    let mut tools = arena_tools();
    tools.extend(swiss_tools());
    tools.push(ToolSpec::remote(
        "get_simuls",
        "fetch simuls",
        "Recently created, started and finished simuls.",
        Auth::Optional,
        |_, _| Ok(RequestSpec::get("/api/simul")),
    ));
    tools
}

// ----------------------------------------------------------------------
// Arena
// ----------------------------------------------------------------------

fn arena_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "get_current_tournaments",
            "fetch current tournaments",
            "Created, started and finished arena tournaments.",
            Auth::Optional,
            |_, _| Ok(RequestSpec::get("/api/tournament")),
        ),
        ToolSpec::remote(
            "get_tournament",
            "fetch tournament",
            "Info about an arena tournament, including the first page of standings.",
            Auth::Optional,
            |args, _| Ok(RequestSpec::get("/api/tournament").segment(args.str("tournament_id")?)),
        )
        .fields(vec![tournament_id()])
        .resource("tournament", "tournament_id"),
        ToolSpec::remote(
            "create_tournament",
            "create tournament",
            "Create a public or private arena tournament. clock_time is in minutes.",
            Auth::Required,
            create_tournament,
        )
        .fields(vec![
            Field::string("name", "Tournament name"),
            Field::number("clock_time", "Initial clock time in minutes")
                .required()
                .range(0, 60),
            Field::integer("clock_increment", "Clock increment in seconds")
                .required()
                .range(0, 60),
            Field::integer("minutes", "Tournament duration in minutes")
                .required()
                .range(20, 720),
            Field::integer("wait_minutes", "Minutes before the tournament starts").default_int(5),
            Field::integer("start_date", "Start timestamp in milliseconds; overrides wait_minutes"),
            variant(),
            Field::boolean("rated", "Rated games").default_bool(true),
            Field::string("position", "Custom initial position (FEN)"),
            Field::boolean("berserkable", "Whether players can berserk"),
            Field::boolean("streakable", "Whether players get streak bonuses"),
            Field::boolean("has_chat", "Whether the chat is enabled"),
            Field::string("description", "Tournament description (markdown)"),
            Field::string("password", "Password for a private tournament"),
            Field::string("team_battle_by_team", "Team id to start a team battle"),
            Field::object("conditions", "Entry conditions, passed through unchanged"),
        ]),
        ToolSpec::remote(
            "join_tournament",
            "join tournament",
            "Join an arena tournament, optionally for a team.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new()
                    .push_opt("password", args.opt_str("password"))
                    .push_opt("team", args.opt_str("team"));
                Ok(arena(args)?.then("join").form(form.into_pairs()))
            },
        )
        .fields(vec![
            tournament_id(),
            Field::string("password", "Tournament password if private"),
            Field::string("team", "Team to join with for team battles").identifier(),
        ])
        .resource("tournament", "tournament_id"),
        ToolSpec::remote(
            "withdraw_tournament",
            "withdraw from tournament",
            "Leave an arena tournament, or pause if it has started.",
            Auth::Required,
            |args, _| Ok(arena(args)?.then("withdraw")),
        )
        .fields(vec![tournament_id()])
        .resource("tournament", "tournament_id"),
        ToolSpec::remote(
            "terminate_tournament",
            "terminate tournament",
            "Terminate an arena tournament you created.",
            Auth::Required,
            |args, _| Ok(arena(args)?.then("terminate")),
        )
        .fields(vec![tournament_id()])
        .resource("tournament", "tournament_id"),
        ToolSpec::remote(
            "get_tournament_results",
            "fetch tournament results",
            "Results of an arena tournament, best rank first.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/tournament")
                    .segment(args.str("tournament_id")?)
                    .then("results")
                    .query_opt("nb", args.opt_int("nb"))
                    .accept(NDJSON))
            },
        )
        .fields(vec![
            tournament_id(),
            Field::integer("nb", "Maximum number of players").range(1, 1000),
        ])
        .resource("tournament", "tournament_id"),
        ToolSpec::remote(
            "export_tournament_games",
            "export tournament games",
            "Games of an arena tournament as PGN or NDJSON.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/tournament")
                    .segment(args.str("tournament_id")?)
                    .then("games")
                    .accept(accept_for(args.str("format")?)))
            },
        )
        .fields(vec![
            tournament_id(),
            Field::string("format", "pgn or ndjson")
                .one_of(STREAM_FORMATS)
                .default_str("ndjson"),
        ])
        .resource("tournament", "tournament_id"),
        ToolSpec::remote(
            "get_tournaments_created_by",
            "fetch tournaments created by user",
            "Arena tournaments created by a user.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .then("tournament/created")
                    .accept(NDJSON))
            },
        )
        .fields(vec![username("Tournament creator")])
        .resource("user", "username"),
    ]
}

fn create_tournament(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let mut body = json!({
        "clockTime": args.number("clock_time")?,
        "clockIncrement": args.int("clock_increment")?,
        "minutes": args.int("minutes")?,
        "waitMinutes": args.int("wait_minutes")?,
        "rated": args.bool("rated")?,
    });
    put_opt(&mut body, "name", opt_value(args.opt_str("name")));
    put_opt(&mut body, "startDate", opt_value(args.opt_int("start_date")));
    put_opt(&mut body, "variant", opt_value(args.opt_str("variant")));
    put_opt(&mut body, "position", opt_value(args.opt_str("position")));
    put_opt(&mut body, "berserkable", opt_value(args.opt_bool("berserkable")));
    put_opt(&mut body, "streakable", opt_value(args.opt_bool("streakable")));
    put_opt(&mut body, "hasChat", opt_value(args.opt_bool("has_chat")));
    put_opt(&mut body, "description", opt_value(args.opt_str("description")));
    put_opt(&mut body, "password", opt_value(args.opt_str("password")));
    put_opt(
        &mut body,
        "teamBattleByTeam",
        opt_value(args.opt_str("team_battle_by_team")),
    );
    put_opt(&mut body, "conditions", args.get("conditions").cloned());
    Ok(RequestSpec::post("/api/tournament").json(body))
}

// ----------------------------------------------------------------------
// Swiss
// ----------------------------------------------------------------------

fn swiss_tools() -> Vec<ToolSpec> {
    let mut create_fields = vec![team_id(), Field::string("name", "Tournament name")];
    create_fields.extend(
        clock_fields("Clock; limit in minutes, increment in seconds")
            .into_iter()
            .map(Field::required),
    );
    create_fields.extend(vec![
        Field::integer("nb_rounds", "Number of rounds")
            .required()
            .range(3, 100),
        Field::integer("starts_at", "Start timestamp in milliseconds"),
        Field::integer("round_interval", "Seconds between rounds"),
        variant(),
        Field::boolean("rated", "Rated games").default_bool(true),
        Field::string("description", "Tournament description"),
    ]);

    vec![
        ToolSpec::remote(
            "create_swiss",
            "create Swiss tournament",
            "Create a Swiss tournament for a team you lead. The clock limit is in minutes.",
            Auth::Required,
            create_swiss,
        )
        .fields(create_fields)
        .checks(vec![CLOCK_TOGETHER])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "get_swiss",
            "fetch Swiss tournament",
            "Info about a Swiss tournament.",
            Auth::Optional,
            |args, _| Ok(RequestSpec::get("/api/swiss").segment(args.str("swiss_id")?)),
        )
        .fields(vec![swiss_id()])
        .resource("Swiss tournament", "swiss_id"),
        ToolSpec::remote(
            "join_swiss",
            "join Swiss tournament",
            "Join a Swiss tournament.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new().push_opt("password", args.opt_str("password"));
                Ok(swiss(args)?.then("join").form(form.into_pairs()))
            },
        )
        .fields(vec![
            swiss_id(),
            Field::string("password", "Tournament password if required"),
        ])
        .resource("Swiss tournament", "swiss_id"),
        ToolSpec::remote(
            "withdraw_swiss",
            "withdraw from Swiss tournament",
            "Leave a Swiss tournament, or pause if it has started.",
            Auth::Required,
            |args, _| Ok(swiss(args)?.then("withdraw")),
        )
        .fields(vec![swiss_id()])
        .resource("Swiss tournament", "swiss_id"),
        ToolSpec::remote(
            "terminate_swiss",
            "terminate Swiss tournament",
            "Terminate a Swiss tournament you created.",
            Auth::Required,
            |args, _| Ok(swiss(args)?.then("terminate")),
        )
        .fields(vec![swiss_id()])
        .resource("Swiss tournament", "swiss_id"),
        ToolSpec::remote(
            "export_swiss_trf",
            "export Swiss TRF",
            "Swiss tournament in the FIDE TRF format.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/swiss")
                    .segment(format!("{}.trf", args.str("swiss_id")?))
                    .accept(TEXT))
            },
        )
        .fields(vec![swiss_id()])
        .resource("Swiss tournament", "swiss_id"),
        ToolSpec::remote(
            "get_swiss_results",
            "fetch Swiss results",
            "Results of a Swiss tournament, best rank first.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/swiss")
                    .segment(args.str("swiss_id")?)
                    .then("results")
                    .query_opt("nb", args.opt_int("nb"))
                    .accept(NDJSON))
            },
        )
        .fields(vec![
            swiss_id(),
            Field::integer("nb", "Maximum number of players").range(1, 1000),
        ])
        .resource("Swiss tournament", "swiss_id"),
        ToolSpec::remote(
            "get_team_swiss",
            "fetch team Swiss tournaments",
            "Swiss tournaments of a team, most recent first.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/team")
                    .segment(args.str("team_id")?)
                    .then("swiss")
                    .query_opt("max", args.opt_int("max"))
                    .accept(NDJSON))
            },
        )
        .fields(vec![
            team_id(),
            Field::integer("max", "Maximum number of tournaments").range(1, 100),
        ])
        .resource("team", "team_id"),
    ]
}

fn create_swiss(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let mut body = json!({
        "nbRounds": args.int("nb_rounds")?,
        "rated": args.bool("rated")?,
    });
    put_opt(&mut body, "clock", clock_seconds(args));
    put_opt(&mut body, "name", opt_value(args.opt_str("name")));
    put_opt(&mut body, "startsAt", opt_value(args.opt_int("starts_at")));
    put_opt(&mut body, "roundInterval", opt_value(args.opt_int("round_interval")));
    put_opt(&mut body, "variant", opt_value(args.opt_str("variant")));
    put_opt(&mut body, "description", opt_value(args.opt_str("description")));
    Ok(RequestSpec::post("/api/swiss/new")
        .segment(args.str("team_id")?)
        .json(body))
}
