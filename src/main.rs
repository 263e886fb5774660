use anyhow::Result;
use chrono::Utc;
use refquest::cli::{self, Commands};
use refquest::commands::{self, record::RecordRequest, CommandContext};
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Classify { ids } => commands::classify::classify_ids(&ids, &mut out)?,
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            commands::init::init_config(&cwd, force, &mut out)?;
        }
        command => {
            let ctx = CommandContext::new(cli::resolve_config(cli.state_dir.as_deref()));
            run_stateful(&ctx, command, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn run_stateful(ctx: &CommandContext, command: Commands, out: &mut dyn Write) -> Result<()> {
    let now = Utc::now();
    match command {
        Commands::Record {
            id,
            file,
            element,
            source,
        } => {
            let request = RecordRequest {
                raw_id: id,
                file,
                element,
                source: source.into(),
            };
            commands::record::record_detection(ctx, &request, now, out)?;
        }
        Commands::Status { format } => {
            commands::status::show_status(ctx, format.into(), now, out)?;
        }
        Commands::Quests { completed } => {
            commands::quests::list_quests(ctx, completed, now, out)?;
        }
        Commands::Export { format, output } => {
            commands::export::export_stats(ctx, format.into(), output.as_deref(), now, out)?;
        }
        Commands::Reset { quests } => commands::reset::reset_profile(ctx, quests, now, out)?,
        Commands::Classify { .. } | Commands::Init { .. } => {
            anyhow::bail!("command does not use saved state")
        }
    }
    Ok(())
}
