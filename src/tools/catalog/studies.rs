//! Study export and PGN import.

use super::{id8, username, variant};
use crate::tools::request::{FormPairs, RequestSpec, NDJSON, PGN};
use crate::tools::validator::Field;
use crate::tools::{Auth, ToolSpec};

fn study_id() -> Field {
    id8("study_id", "Eight-character study id")
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::remote(
            "export_study",
            "export study",
            "All chapters of a study as PGN.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/study")
                    .segment(format!("{}.pgn", args.str("study_id")?))
                    .query_opt("clocks", args.opt_bool("clocks"))
                    .query_opt("comments", args.opt_bool("comments"))
                    .query_opt("variations", args.opt_bool("variations"))
                    .accept(PGN))
            },
        )
        .fields(vec![
            study_id(),
            Field::boolean("clocks", "Include clock comments"),
            Field::boolean("comments", "Include analysis and annotator comments"),
            Field::boolean("variations", "Include non-mainline moves"),
        ])
        .resource("study", "study_id"),
        ToolSpec::remote(
            "export_study_chapter",
            "export study chapter",
            "One chapter of a study as PGN.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/study")
                    .segment(args.str("study_id")?)
                    .segment(format!("{}.pgn", args.str("chapter_id")?))
                    .accept(PGN))
            },
        )
        .fields(vec![
            study_id(),
            id8("chapter_id", "Eight-character chapter id"),
        ])
        .resource("study", "study_id"),
        ToolSpec::remote(
            "list_user_studies",
            "list user studies",
            "Metadata of the studies of a user.",
            Auth::Optional,
            |args, _| {
                Ok(RequestSpec::get("/api/study/by")
                    .segment(args.str("username")?)
                    .accept(NDJSON))
            },
        )
        .fields(vec![username("Study owner")])
        .resource("user", "username"),
        ToolSpec::remote(
            "import_pgn_into_study",
            "import PGN into study",
            "Create chapters in a study from a PGN; one chapter per game.",
            Auth::Required,
            |args, _| {
                let form = FormPairs::new()
                    .push("name", args.str("name")?)
                    .push("pgn", args.str("pgn")?)
                    .push_opt("orientation", args.opt_str("orientation"))
                    .push_opt("variant", args.opt_str("variant"));
                Ok(RequestSpec::post("/api/study")
                    .segment(args.str("study_id")?)
                    .then("import-pgn")
                    .form(form.into_pairs()))
            },
        )
        .fields(vec![
            study_id(),
            Field::string("name", "Chapter name").required(),
            Field::string("pgn", "PGN to import").required(),
            Field::string("orientation", "Board orientation").one_of(&["white", "black"]),
            variant(),
        ])
        .resource("study", "study_id"),
    ]
}
