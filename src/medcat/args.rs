use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "medcat")]
#[command(about = "Admin client for a medication catalog API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the configured API base URL for this invocation
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose output (request/response traces)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Account email (password is prompted)
        email: String,
    },

    /// Clear the stored session token
    Logout,

    /// List one page of the catalog
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Search medicines by name
    Search { term: String },

    /// Interactive catalog browser (type to search, arrows to page)
    #[command(alias = "b")]
    Browse,

    /// Show a medicine's full record
    #[command(alias = "v")]
    View { id: String },

    /// Edit a medicine in the editor and save
    #[command(alias = "e")]
    Edit {
        id: String,

        /// Leaflet section to edit (e.g. dosage); omit to edit the
        /// basic fields
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Manage photo attachments
    Photos {
        #[command(subcommand)]
        action: PhotoCommands,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (api-url, page-size)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommands {
    /// List a medicine's photos
    #[command(alias = "ls")]
    List { id: String },

    /// Upload a photo file
    Upload { id: String, file: PathBuf },

    /// Delete a photo by its server key
    Delete {
        id: String,
        key: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
