use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "studyplan", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a study goal
    ///
    /// Example: studyplan add Math "Integration by parts" 2024-05-03
    Add {
        subject: String,
        topic: String,
        /// Target date, YYYY-MM-DD
        date: String,
    },
    /// List all goals with the progress summary
    ///
    /// Example: studyplan list
    List,
    /// Toggle a goal between open and done
    ///
    /// Example: studyplan toggle 2
    Toggle {
        id: u64,
    },
    /// Delete a goal (asks for confirmation)
    ///
    /// Example: studyplan delete 2
    /// Example: studyplan delete 2 --yes
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the progress summary
    ///
    /// Example: studyplan stats
    Stats,
    /// Toggle the color theme, or set it explicitly
    ///
    /// Example: studyplan theme
    /// Example: studyplan theme dark
    Theme {
        theme: Option<String>,
    },
}
