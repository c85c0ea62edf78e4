//! Game export, import, TV and cloud evaluation.

use super::{accept_for, game_id, username, variant, GAME_FORMATS, STREAM_FORMATS};
use crate::interfaces::error::ToolError;
use crate::tools::request::{FormPairs, RequestSpec};
use crate::tools::validator::{Args, Field};
use crate::tools::{Auth, BuildContext, ToolSpec};

const EXPORT_FLAGS: &[(&str, &str)] = &[
    ("moves", "Include the PGN moves"),
    ("tags", "Include the PGN tags"),
    ("clocks", "Include clock comments when available"),
    ("evals", "Include analysis evaluations when available"),
    ("opening", "Include the opening name"),
];

fn export_flag_fields() -> Vec<Field> {
    EXPORT_FLAGS
        .iter()
        .map(|&(name, description)| Field::boolean(name, description))
        .collect()
}

fn with_export_flags(mut request: RequestSpec, args: &Args) -> RequestSpec {
    for (name, _) in EXPORT_FLAGS {
        request = request.query_opt(name, args.opt_bool(name));
    }
    request
}

pub fn tools() -> Vec<ToolSpec> {
    let mut export_game_fields = vec![
        game_id(),
        Field::string("format", "pgn or json")
            .one_of(GAME_FORMATS)
            .default_str("pgn"),
    ];
    export_game_fields.extend(export_flag_fields());

    let mut ongoing_fields = vec![
        username("Player whose current game to export"),
        Field::string("format", "pgn or json")
            .one_of(GAME_FORMATS)
            .default_str("pgn"),
    ];
    ongoing_fields.extend(export_flag_fields());

    vec![
        ToolSpec::remote(
            "export_game",
            "export game",
            "Export one game as PGN or JSON.",
            Auth::Optional,
            |args, _| {
                let request = RequestSpec::get("/game/export")
                    .segment(args.str("game_id")?)
                    .accept(accept_for(args.str("format")?));
                Ok(with_export_flags(request, args))
            },
        )
        .fields(export_game_fields)
        .resource("game", "game_id"),
        ToolSpec::remote(
            "export_ongoing_game",
            "export ongoing game",
            "Export the ongoing game, or the last game played, of a user.",
            Auth::Optional,
            |args, _| {
                let request = RequestSpec::get("/api/user")
                    .segment(args.str("username")?)
                    .then("current-game")
                    .accept(accept_for(args.str("format")?));
                Ok(with_export_flags(request, args))
            },
        )
        .fields(ongoing_fields)
        .resource("user", "username"),
        ToolSpec::remote(
            "export_user_games",
            "export user games",
            "Export the games of a user, most recent first.",
            Auth::Optional,
            export_user_games,
        )
        .fields(vec![
            username("Player whose games to export"),
            Field::string("format", "pgn or ndjson")
                .one_of(STREAM_FORMATS)
                .default_str("ndjson"),
            Field::integer("max", "Maximum number of games").range(1, 300),
            Field::integer("since", "Games played since this timestamp (ms)"),
            Field::integer("until", "Games played until this timestamp (ms)"),
            Field::string("vs", "Only games against this opponent").identifier(),
            Field::boolean("rated", "Only rated (true) or casual (false) games"),
            Field::string("perf_type", "Comma-separated speeds or variants"),
            Field::string("color", "Only games played as this color").one_of(&["white", "black"]),
            Field::boolean("analysed", "Only games with a computer analysis"),
            Field::boolean("ongoing", "Include ongoing games"),
            Field::boolean("finished", "Include finished games"),
        ])
        .resource("user", "username"),
        ToolSpec::remote(
            "export_games_by_ids",
            "export games by ids",
            "Export up to 300 games by id.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::post("/api/games/export/_ids")
                    .text(args.str("ids")?)
                    .accept(accept_for(args.str("format")?)))
            },
        )
        .fields(vec![
            Field::string("ids", "Comma-separated game ids").required(),
            Field::string("format", "pgn or ndjson")
                .one_of(STREAM_FORMATS)
                .default_str("ndjson"),
        ]),
        ToolSpec::remote(
            "import_game",
            "import game",
            "Import a game from PGN. Returns the game id and URL.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::post("/api/import")
                    .form(FormPairs::new().push("pgn", args.str("pgn")?).into_pairs()))
            },
        )
        .fields(vec![Field::string("pgn", "PGN of the game").required()]),
        ToolSpec::remote(
            "get_tv_channels",
            "fetch TV channels",
            "Current Lichess TV games for every channel.",
            Auth::Optional,
            |_, _| Ok(RequestSpec::get("/api/tv/channels")),
        ),
        ToolSpec::remote(
            "get_cloud_eval",
            "fetch cloud evaluation",
            "Cached cloud evaluation of a position, if one exists.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/cloud-eval")
                    .query("fen", args.str("fen")?)
                    .query_opt("multiPv", args.opt_int("multi_pv"))
                    .query_opt("variant", args.opt_str("variant")))
            },
        )
        .fields(vec![
            Field::string("fen", "FEN of the position").required(),
            Field::integer("multi_pv", "Number of variations").range(1, 5),
            variant(),
        ]),
    ]
}

fn export_user_games(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    let request = RequestSpec::get("/api/games/user")
        .segment(args.str("username")?)
        .accept(accept_for(args.str("format")?))
        .query_opt("max", args.opt_int("max"))
        .query_opt("since", args.opt_int("since"))
        .query_opt("until", args.opt_int("until"))
        .query_opt("vs", args.opt_str("vs"))
        .query_opt("rated", args.opt_bool("rated"))
        .query_opt("perfType", args.opt_str("perf_type"))
        .query_opt("color", args.opt_str("color"))
        .query_opt("analysed", args.opt_bool("analysed"))
        .query_opt("ongoing", args.opt_bool("ongoing"))
        .query_opt("finished", args.opt_bool("finished"));
    Ok(request)
}
