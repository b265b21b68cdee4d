use std::path::Path;

use redline_config::RedlineConfig;
use redline_core::responses::CreateDocumentResponse;
use redline_core::timestamps;
use redline_docx::scaffold::{self, NewDocument};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateDocumentArgs;
use crate::output::output;

/// Handle `redline create-document`.
pub fn handle(
    args: &CreateDocumentArgs,
    config: &RedlineConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&run(args, config)?, flags.format)
}

pub fn run(
    args: &CreateDocumentArgs,
    config: &RedlineConfig,
) -> anyhow::Result<CreateDocumentResponse> {
    let new = NewDocument {
        text: args.text.clone(),
        title: args.title.clone(),
        creator: config.author.name.clone(),
        created: timestamps::now_iso(),
    };
    let destination = Path::new(&args.output);
    scaffold::create_document(destination, &new)?;
    tracing::info!(path = %destination.display(), "document created");

    Ok(CreateDocumentResponse {
        output: destination.display().to_string(),
        title: new.title,
        initial_text: new.text,
    })
}
