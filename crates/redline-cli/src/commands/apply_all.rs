use std::io::{self, BufRead, Write};

use redline_config::RedlineConfig;
use redline_core::entities::Change;
use redline_core::responses::BatchApplyResponse;
use redline_docx::mutate::{self, ChangeFilter};
use redline_docx::revisions;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ApplyAllArgs;
use crate::commands::shared::document;
use crate::commands::shared::parse::parse_kind;
use crate::confirm::ConfirmationGate;
use crate::output::output;
use crate::output::proposal::render_batch_proposal;

const TOKEN: &str = "APPLY ALL";

/// Handle `redline apply-all`.
pub fn handle(
    args: &ApplyAllArgs,
    config: &RedlineConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let response = run(
        args,
        config,
        &mut stdin.lock(),
        &mut io::stderr(),
    )?;
    output(&response, flags.format)
}

pub fn run<R: BufRead, W: Write>(
    args: &ApplyAllArgs,
    config: &RedlineConfig,
    input: &mut R,
    prompt: &mut W,
) -> anyhow::Result<BatchApplyResponse> {
    let filter = ChangeFilter {
        author: args.author.clone(),
        kind: args.kind.as_deref().map(parse_kind).transpose()?,
    };

    let mut package = document::open(&args.document)?;
    let marks = revisions::enumerate(package.document());
    let selected = filter.select(&marks);

    let mut response = BatchApplyResponse {
        selected: u32::try_from(selected.len())?,
        applied: 0,
        author_filter: filter.author.clone(),
        kind_filter: filter.kind,
        output: None,
    };
    if selected.is_empty() {
        tracing::info!(total = marks.len(), "no tracked changes match the filters");
        return Ok(response);
    }

    let changes: Vec<Change> = selected.iter().map(|mark| mark.to_change()).collect();
    let summary = render_batch_proposal(
        &changes,
        filter.author.as_deref(),
        filter.kind,
        config.display.preview_chars,
    );
    let mut gate = ConfirmationGate::propose(TOKEN, args.yes);
    gate.ask(&summary, input, prompt)?;
    gate.require_confirmed()?;

    let applied = mutate::apply_batch(package.document_mut(), &selected);
    let destination = document::destination(&args.document, args.output.as_deref());
    response.applied = u32::try_from(applied)?;
    response.output = Some(document::commit(package, &destination)?);
    Ok(response)
}
