use redline_config::RedlineConfig;
use redline_core::responses::InsertChangeResponse;
use redline_core::timestamps;
use redline_docx::mutate::{self, NewMark};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InsertChangeArgs;
use crate::commands::shared::document;
use crate::commands::shared::parse::{parse_insert_kind, require_text};
use crate::output::output;

/// Handle `redline insert-change`.
pub fn handle(
    args: &InsertChangeArgs,
    config: &RedlineConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&run(args, config)?, flags.format)
}

pub fn run(args: &InsertChangeArgs, config: &RedlineConfig) -> anyhow::Result<InsertChangeResponse> {
    let mark = NewMark {
        kind: parse_insert_kind(&args.kind)?,
        text: require_text(&args.text, "--text")?.to_string(),
        author: args
            .author
            .clone()
            .unwrap_or_else(|| config.author.name.clone()),
        date: timestamps::now_iso(),
    };

    let mut package = document::open(&args.document)?;
    let revision_id =
        mutate::insert_mark(package.document_mut(), &mark, document::anchor(args.paragraph))?;
    let destination = document::destination(&args.document, args.output.as_deref());
    let output = document::commit(package, &destination)?;

    Ok(InsertChangeResponse {
        kind: mark.kind,
        revision_id,
        author: mark.author,
        date: mark.date,
        text: mark.text,
        output,
    })
}
