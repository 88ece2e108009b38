pub mod analytics;
pub mod overview;
pub mod sessions;
pub mod tasks;

use std::sync::Arc;

use analytics::{process_analytics_command, AnalyticsCommand};
use ansi_term::Colour;
use anyhow::Result;
use clap::{Parser, Subcommand};
use overview::{process_overview_command, OverviewCommand};
use sessions::{process_sessions_command, process_track_command, SessionsCommand, TrackCommand};
use tasks::{process_task_command, TaskCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    notify::{Notice, NoticeVariant, Notifier, TracingNotifier},
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Dayboard", version, long_about = None)]
#[command(about = "Task list, stopwatch and productivity figures", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long = "log-to-file",
        help = "Also write logs to $XDG_STATE_HOME/dayboard/logs or $HOME/.local/state/dayboard/logs"
    )]
    log_to_file: bool,
    #[arg(long, short, help = "Send confirmations to the log instead of the terminal")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(flatten)]
    Tasks(TaskCommand),
    #[command(about = "Time a work session, printing the stopwatch every second")]
    Track {
        #[command(flatten)]
        command: TrackCommand,
    },
    #[command(about = "Show recent sessions and time totals")]
    Sessions {
        #[command(flatten)]
        command: SessionsCommand,
    },
    #[command(about = "Show task progress, time against the daily and weekly goals, and productivity")]
    Overview {
        #[command(flatten)]
        command: OverviewCommand,
    },
    #[command(about = "Show weekly or monthly productivity figures")]
    Analytics {
        #[command(flatten)]
        command: AnalyticsCommand,
    },
}

/// Prints notices the way a toast would show them: title first, then the description.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.variant {
            NoticeVariant::Default => {
                println!("{} {}", Colour::Green.bold().paint(notice.title), notice.description)
            }
            NoticeVariant::Destructive => {
                eprintln!("{} {}", Colour::Red.bold().paint(notice.title), notice.description)
            }
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let log_dir = if args.log_to_file {
        Some(create_application_default_path()?.join("logs"))
    } else {
        None
    };
    enable_logging(log_dir.as_deref(), logging_level, args.log)?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let notifier: Box<dyn Notifier> = if args.quiet {
        Box::new(TracingNotifier)
    } else {
        Box::new(ConsoleNotifier)
    };

    match args.commands {
        Commands::Tasks(command) => process_task_command(command, clock, notifier),
        Commands::Track { command } => process_track_command(command, clock, notifier).await,
        Commands::Sessions { command } => process_sessions_command(command, clock, notifier),
        Commands::Overview { command } => process_overview_command(command, clock, notifier),
        Commands::Analytics { command } => process_analytics_command(command),
    }
}
