use redline_config::RedlineConfig;
use redline_core::enums::Resolution;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &RedlineConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::ListChanges(args) => commands::list_changes::handle(args, config, flags),
        Commands::ListComments(args) => commands::list_comments::handle(args, config, flags),
        Commands::ApplyChange(args) => {
            commands::resolve::handle(args, Resolution::Applied, config, flags)
        }
        Commands::RejectChange(args) => {
            commands::resolve::handle(args, Resolution::Rejected, config, flags)
        }
        Commands::ApplyAll(args) => commands::apply_all::handle(args, config, flags),
        Commands::InsertChange(args) => commands::insert_change::handle(args, config, flags),
        Commands::InsertComment(args) => commands::insert_comment::handle(args, config, flags),
        Commands::CreateDocument(args) => commands::create_document::handle(args, config, flags),
    }
}
