use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "refquest")]
#[command(about = "Earn XP and complete quests for the refactorings you perform", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding player.json and quests.json
    #[arg(long, global = true, env = "REFQUEST_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which refactoring kind each identifier maps to
    Classify {
        /// Raw identifiers as reported by an editor
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Record one detected refactoring and save the profile
    Record {
        /// Raw identifier as reported by an editor
        id: String,

        /// File the refactoring touched
        #[arg(long)]
        file: Option<String>,

        /// Element the refactoring touched (truncated to 50 characters)
        #[arg(long)]
        element: Option<String>,

        /// Which editor facility reported the refactoring
        #[arg(long, value_enum, default_value = "unspecified")]
        source: SourceArg,
    },

    /// Show level, XP and per-category statistics
    Status {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: FormatArg,
    },

    /// List quests and their progress
    Quests {
        /// List completed quests instead of active ones
        #[arg(long)]
        completed: bool,
    },

    /// Export statistics to a file or stdout
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear XP and history
    Reset {
        /// Also replace all quests with the starter set
        #[arg(long)]
        quests: bool,
    },

    /// Initialize a .refquest.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
    Markdown,
    Terminal,
}

impl From<FormatArg> for crate::io::OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => crate::io::OutputFormat::Json,
            FormatArg::Csv => crate::io::OutputFormat::Csv,
            FormatArg::Markdown => crate::io::OutputFormat::Markdown,
            FormatArg::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    RefactoringEvent,
    UserAction,
    Command,
    Unspecified,
}

impl From<SourceArg> for crate::core::DetectionSource {
    fn from(source: SourceArg) -> Self {
        use crate::core::DetectionSource;
        match source {
            SourceArg::RefactoringEvent => DetectionSource::RefactoringEvent,
            SourceArg::UserAction => DetectionSource::UserAction,
            SourceArg::Command => DetectionSource::Command,
            SourceArg::Unspecified => DetectionSource::Unspecified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_record_arguments() {
        let cli = Cli::try_parse_from([
            "refquest",
            "record",
            "refactoring.extractMethod",
            "--file",
            "Main.kt",
            "--source",
            "refactoring-event",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 1);
        match cli.command {
            Commands::Record { id, file, source, .. } => {
                assert_eq!(id, "refactoring.extractMethod");
                assert_eq!(file.as_deref(), Some("Main.kt"));
                assert_eq!(source, SourceArg::RefactoringEvent);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_classify_requires_an_id() {
        assert!(Cli::try_parse_from(["refquest", "classify"]).is_err());
    }
}
