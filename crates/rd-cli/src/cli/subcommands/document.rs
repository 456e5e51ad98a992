use std::path::PathBuf;

use clap::Subcommand;

/// Document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocumentCommands {
    /// Copy a file into storage and attach it to a project.
    Add {
        project_id: String,
        file: PathBuf,
        /// Display name; defaults to the file name.
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List a project's documents.
    List { project_id: String },
    /// Delete a document record and its stored file.
    Delete {
        project_id: String,
        document_id: String,
    },
}
