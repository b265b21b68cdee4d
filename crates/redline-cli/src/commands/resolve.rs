use std::io::{self, BufRead, Write};

use redline_config::RedlineConfig;
use redline_core::enums::Resolution;
use redline_core::responses::ResolveResponse;
use redline_docx::{mutate, revisions};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::commands::shared::document;
use crate::confirm::ConfirmationGate;
use crate::output::output;
use crate::output::proposal::render_change_proposal;

/// Handle `redline apply-change` and `redline reject-change`.
pub fn handle(
    args: &ResolveArgs,
    resolution: Resolution,
    config: &RedlineConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let response = run(
        args,
        resolution,
        config,
        &mut stdin.lock(),
        &mut io::stderr(),
    )?;
    output(&response, flags.format)
}

const fn verb_and_token(resolution: Resolution) -> (&'static str, &'static str) {
    match resolution {
        Resolution::Applied => ("apply", "APPLY"),
        Resolution::Rejected => ("reject", "REJECT"),
    }
}

pub fn run<R: BufRead, W: Write>(
    args: &ResolveArgs,
    resolution: Resolution,
    config: &RedlineConfig,
    input: &mut R,
    prompt: &mut W,
) -> anyhow::Result<ResolveResponse> {
    let mut package = document::open(&args.document)?;
    let marks = revisions::enumerate(package.document());
    let mark = revisions::find(&marks, args.change_id)?;
    let change = mark.to_change();

    let (verb, token) = verb_and_token(resolution);
    let summary = render_change_proposal(verb, &change, config.display.preview_chars);
    let mut gate = ConfirmationGate::propose(token, args.yes);
    gate.ask(&summary, input, prompt)?;
    gate.require_confirmed()?;

    mutate::resolve(package.document_mut(), mark, resolution)?;
    let destination = document::destination(&args.document, args.output.as_deref());
    let output = document::commit(package, &destination)?;

    Ok(ResolveResponse {
        resolution,
        change,
        output,
    })
}
