//! Teams: lookup, search and membership.

use super::{team_id, username};
use crate::interfaces::error::ToolError;
use crate::tools::request::{FormPairs, RequestSpec, NDJSON};
use crate::tools::validator::{Args, Field};
use crate::tools::{Auth, ToolSpec};

fn team(args: &Args) -> Result<RequestSpec, ToolError> {
    Ok(RequestSpec::get("/api/team").segment(args.str("team_id")?))
}

/// Membership changes live outside `/api` on Lichess.
fn team_page(args: &Args) -> Result<RequestSpec, ToolError> {
    Ok(RequestSpec::post("/team").segment(args.str("team_id")?))
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "get_team",
            "fetch team",
            "Info about a team.",
            Auth::Optional,
            |args, _| team(args),
        )
        .fields(vec![team_id()])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "get_popular_teams",
            "fetch popular teams",
            "Paginated list of the most popular teams.",
            Auth::Optional,
            |args, _| Ok(RequestSpec::get("/api/team/all").query("page", args.int("page")?)),
        )
        .fields(vec![Field::integer("page", "Page number").range(1, 1000).default_int(1)]),
        ToolSpec::remote(
            "get_teams_of_user",
            "fetch teams of user",
            "All teams a player is a member of.",
            Auth::Optional,
            |args, _| Ok(RequestSpec::get("/api/team/of").segment(args.str("username")?)),
        )
        .fields(vec![username("Player")])
        .resource("user", "username"),
        ToolSpec::remote(
            "search_teams",
            "search teams",
            "Paginated team search by keyword.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/team/search")
                    .query("text", args.str("text")?)
                    .query_opt("page", args.opt_int("page")))
            },
        )
        .fields(vec![
            Field::string("text", "Search keywords").required(),
            Field::integer("page", "Page number").range(1, 1000),
        ]),
        ToolSpec::remote(
            "get_team_members",
            "fetch team members",
            "Members of a team, most recent first.",
            Auth::Optional,
            |args, _| Ok(team(args)?.then("users").accept(NDJSON)),
        )
        .fields(vec![team_id()])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "get_team_arena_tournaments",
            "fetch team arena tournaments",
            "Arena tournaments of a team, most recent first.",
            Auth::Optional,
            |args, _| {
                Ok(team(args)?
                    .then("arena")
                    .query_opt("max", args.opt_int("max"))
                    .accept(NDJSON))
            },
        )
        .fields(vec![
            team_id(),
            Field::integer("max", "Maximum number of tournaments").range(1, 100),
        ])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "join_team",
            "join team",
            "Join a team, or send a join request if the team requires approval.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new()
                    .push_opt("message", args.opt_str("message"))
                    .push_opt("password", args.opt_str("password"));
                Ok(team_page(args)?.then("join").form(form.into_pairs()))
            },
        )
        .fields(vec![
            team_id(),
            Field::string("message", "Join request message"),
            Field::string("password", "Team entry code"),
        ])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "leave_team",
            "leave team",
            "Leave a team.",
            Auth::Required,
            |args, _| Ok(team_page(args)?.then("quit")),
        )
        .fields(vec![team_id()])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "kick_team_member",
            "kick team member",
            "Remove a member from a team you lead.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::post("/api/team")
                    .segment(args.str("team_id")?)
                    .then("kick")
                    .segment(args.str("user_id")?))
            },
        )
        .fields(vec![
            team_id(),
            Field::string("user_id", "Member to remove").required().identifier(),
        ])
        .resource("team", "team_id"),
        ToolSpec::remote(
            "message_team",
            "message team",
            "Send a private message to every member of a team you lead.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new().push("message", args.str("message")?);
                Ok(team_page(args)?.then("pm-all").form(form.into_pairs()))
            },
        )
        .fields(vec![
            team_id(),
            Field::string("message", "Message to send").required(),
        ])
        .resource("team", "team_id"),
    ]
}
