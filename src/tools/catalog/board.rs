//! Board API: playing a game with the token owner's account.

use super::game_id;
use crate::interfaces::error::ToolError;
use crate::tools::request::{FormPairs, RequestSpec};
use crate::tools::validator::{Args, Field};
use crate::tools::{Auth, BuildContext, BuildFn, ToolSpec};

const CHAT_ROOMS: &[&str] = &["player", "spectator"];

fn board(args: &Args) -> Result<RequestSpec, ToolError> {
    Ok(RequestSpec::post("/api/board/game").segment(args.str("game_id")?))
}

fn answer(args: &Args) -> Result<&'static str, ToolError> {
    Ok(if args.bool("accept")? { "yes" } else { "no" })
}

/// A bodiless POST to `/api/board/game/{id}/{suffix}`.
fn game_action(
    name: &'static str,
    action: &'static str,
    description: &'static str,
    build: BuildFn,
) -> ToolSpec {
    ToolSpec::remote(name, action, description, Auth::Required, build)
        .fields(vec![game_id()])
        .resource("game", "game_id")
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "make_move",
            "make move",
            "Play a move in UCI notation (e2e4, e7e8q) in an ongoing board game.",
            Auth::Required,
            make_move,
        )
        .fields(vec![
            game_id(),
            Field::string("move", "Move in UCI notation").required().identifier(),
            Field::boolean("offering_draw", "Offer or accept a draw with the move"),
        ])
        .resource("game", "game_id"),
        game_action("abort_game", "abort game", "Abort a game before it has really started.", |args, _| {
            Ok(board(args)?.then("abort"))
        }),
        game_action("resign_game", "resign game", "Resign an ongoing game.", |args, _| {
            Ok(board(args)?.then("resign"))
        }),
        game_action(
            "claim_victory",
            "claim victory",
            "Claim victory when the opponent has left the game.",
            |args, _| Ok(board(args)?.then("claim-victory")),
        ),
        ToolSpec::remote(
            "write_chat",
            "write chat message",
            "Post a message to the player or spectator chat of a game.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new()
                    .push("room", args.str("room")?)
                    .push("text", args.str("text")?);
                Ok(board(args)?.then("chat").form(form.into_pairs()))
            },
        )
        .fields(vec![
            game_id(),
            Field::string("room", "player or spectator")
                .one_of(CHAT_ROOMS)
                .default_str("player"),
            Field::string("text", "Chat message").required(),
        ])
        .resource("game", "game_id"),
        ToolSpec::remote(
            "get_game_chat",
            "fetch game chat",
            "Messages posted in the chat of a game.",
            Auth::Required,
            |args, _| {
                Ok(RequestSpec::get("/api/board/game")
                    .segment(args.str("game_id")?)
                    .then("chat"))
            },
        )
        .fields(vec![game_id()])
        .resource("game", "game_id"),
        ToolSpec::remote(
            "handle_draw_offer",
            "handle draw offer",
            "Offer, accept (true) or decline (false) a draw.",
            Auth::Required,
            |args, _| Ok(board(args)?.then("draw").segment(answer(args)?)),
        )
        .fields(vec![
            game_id(),
            Field::boolean("accept", "true to offer or accept, false to decline").required(),
        ])
        .resource("game", "game_id"),
        ToolSpec::remote(
            "handle_takeback",
            "handle takeback",
            "Propose, accept (true) or decline (false) a takeback.",
            Auth::Required,
            |args, _| Ok(board(args)?.then("takeback").segment(answer(args)?)),
        )
        .fields(vec![
            game_id(),
            Field::boolean("accept", "true to propose or accept, false to decline").required(),
        ])
        .resource("game", "game_id"),
    ]
}

fn make_move(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
    Ok(board(args)?
        .then("move")
        .segment(args.str("move")?)
        .query_opt("offeringDraw", args.opt_bool("offering_draw")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::error::ErrorKind;
    use crate::tools::catalog::build_request;
    use crate::tools::request::{HttpMethod, RequestBody};
    use serde_json::{json, Value};

    fn build(name: &str, raw: Value) -> Result<RequestSpec, ToolError> {
        build_request(tools(), name, raw, Some("lip_board"))
    }

    #[test]
    fn test_make_move_path() {
        let request = build("make_move", json!({"game_id": "abcdefgh", "move": "e2e4"})).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path(), "/api/board/game/abcdefgh/move/e2e4");
        assert!(request.query.is_empty());

        let request = build(
            "make_move",
            json!({"game_id": "abcdefgh", "move": "e7e8q", "offering_draw": true}),
        )
        .unwrap();
        assert_eq!(request.query_value("offeringDraw"), Some("true"));
    }

    #[test]
    fn test_make_move_rejects_bad_game_id() {
        let err = build("make_move", json!({"game_id": "abc", "move": "e2e4"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_game_actions() {
        for (name, suffix) in [
            ("abort_game", "abort"),
            ("resign_game", "resign"),
            ("claim_victory", "claim-victory"),
        ] {
            let request = build(name, json!({"game_id": "abcdefgh"})).unwrap();
            assert_eq!(request.path(), format!("/api/board/game/abcdefgh/{}", suffix));
        }
    }

    #[test]
    fn test_write_chat_defaults_to_player_room() {
        let request = build("write_chat", json!({"game_id": "abcdefgh", "text": "gl hf"})).unwrap();
        assert_eq!(
            request.body,
            RequestBody::Form(vec![
                ("room".into(), "player".into()),
                ("text".into(), "gl hf".into())
            ])
        );
    }

    #[test]
    fn test_draw_and_takeback_answers() {
        let request =
            build("handle_draw_offer", json!({"game_id": "abcdefgh", "accept": true})).unwrap();
        assert_eq!(request.path(), "/api/board/game/abcdefgh/draw/yes");

        let request =
            build("handle_takeback", json!({"game_id": "abcdefgh", "accept": false})).unwrap();
        assert_eq!(request.path(), "/api/board/game/abcdefgh/takeback/no");
    }

    #[test]
    fn test_chat_is_get() {
        let request = build("get_game_chat", json!({"game_id": "abcdefgh"})).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path(), "/api/board/game/abcdefgh/chat");
    }
}
