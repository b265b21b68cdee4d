use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List pending tracked changes.
    #[command(name = "list-changes")]
    ListChanges(ListArgs),
    /// List comments with the text they annotate.
    #[command(name = "list-comments")]
    ListComments(ListArgs),
    /// Accept one tracked change (asks for confirmation).
    #[command(name = "apply-change")]
    ApplyChange(ResolveArgs),
    /// Reject one tracked change (asks for confirmation).
    #[command(name = "reject-change")]
    RejectChange(ResolveArgs),
    /// Accept every tracked change matching the filters (asks for confirmation).
    #[command(name = "apply-all")]
    ApplyAll(ApplyAllArgs),
    /// Add a tracked insertion or deletion.
    #[command(name = "insert-change")]
    InsertChange(InsertChangeArgs),
    /// Add a comment.
    #[command(name = "insert-comment")]
    InsertComment(InsertCommentArgs),
    /// Create a new, minimal document.
    #[command(name = "create-document")]
    CreateDocument(CreateDocumentArgs),
}

/// Arguments for `redline list-changes` and `redline list-comments`.
#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Path to the .docx document.
    pub document: String,
}

/// Arguments for `redline apply-change` and `redline reject-change`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    /// Path to the .docx document.
    pub document: String,
    /// Change id as shown by `redline list-changes`.
    #[arg(long)]
    pub change_id: u32,
    /// Write the result here instead of overwriting the document.
    #[arg(short, long)]
    pub output: Option<String>,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `redline apply-all`.
#[derive(Clone, Debug, Args)]
pub struct ApplyAllArgs {
    /// Path to the .docx document.
    pub document: String,
    /// Only apply changes by this author.
    #[arg(long)]
    pub author: Option<String>,
    /// Only apply changes of this kind (insertion, deletion, run-formatting, paragraph-formatting).
    #[arg(long)]
    pub kind: Option<String>,
    /// Write the result here instead of overwriting the document.
    #[arg(short, long)]
    pub output: Option<String>,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `redline insert-change`.
#[derive(Clone, Debug, Args)]
pub struct InsertChangeArgs {
    /// Path to the .docx document.
    pub document: String,
    /// Text of the change.
    #[arg(long)]
    pub text: String,
    /// insertion or deletion.
    #[arg(long)]
    pub kind: String,
    /// Author of the change (defaults to the configured author).
    #[arg(long)]
    pub author: Option<String>,
    /// 1-based paragraph to append to (defaults to the last paragraph).
    #[arg(long)]
    pub paragraph: Option<usize>,
    /// Write the result here instead of overwriting the document.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for `redline insert-comment`.
#[derive(Clone, Debug, Args)]
pub struct InsertCommentArgs {
    /// Path to the .docx document.
    pub document: String,
    /// Comment text.
    #[arg(long)]
    pub text: String,
    /// Comment author (defaults to the configured author).
    #[arg(long)]
    pub author: Option<String>,
    /// Author initials (derived from the author when omitted).
    #[arg(long)]
    pub initials: Option<String>,
    /// 1-based paragraph to anchor to (defaults to the last paragraph).
    #[arg(long)]
    pub paragraph: Option<usize>,
    /// Write the result here instead of overwriting the document.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for `redline create-document`.
#[derive(Clone, Debug, Args)]
pub struct CreateDocumentArgs {
    /// Where to write the new document.
    pub output: String,
    /// Initial body text; each line becomes a paragraph.
    #[arg(long)]
    pub text: Option<String>,
    /// Document title (stored in the core properties).
    #[arg(long)]
    pub title: Option<String>,
}
