use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use easylog::config::load_dotenv;
use easylog::{LogLevel, Loggable, LoggerOptions, ProgressOptions};

#[derive(Parser)]
#[command(name = "easylog")]
#[command(about = "Emit log lines and progress bars configured from LOG_* environment variables")]
#[command(version)]
struct Cli {
    /// Logger name shown in every line
    #[arg(short, long, default_value = "easylog")]
    name: String,

    /// Console threshold, overriding LOG_LEVEL_CONSOLE
    #[arg(long)]
    console_level: Option<LogLevel>,

    /// Log file, overriding LOG_FILE
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one message
    Emit {
        /// DEBUG, INFO, WARNING, ERROR or CRITICAL
        level: LogLevel,
        message: String,
    },

    /// Print the resolved configuration as TOML
    Config,

    /// Run a progress bar over a dummy workload
    Progress {
        #[arg(long, default_value_t = 20)]
        count: u64,

        /// Level whose color fills the bar
        #[arg(long, default_value = "DEBUG")]
        level: LogLevel,

        /// Custom indicatif template
        #[arg(long)]
        bar_format: Option<String>,

        #[arg(long)]
        desc: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv();

    let mut options = LoggerOptions::new();
    if let Some(level) = cli.console_level {
        options = options.log_level_console(level);
    }
    if let Some(path) = &cli.log_file {
        options = options.log_file(Some(path));
    }

    let log = Loggable::new(&cli.name, &options).context("Failed to set up logger")?;

    match cli.command {
        Commands::Emit { level, message } => log.log().log(level, message),
        Commands::Config => {
            let text = toml::to_string_pretty(log.logging_options())
                .context("Failed to render configuration")?;
            print!("{text}");
        }
        Commands::Progress {
            count,
            level,
            bar_format,
            desc,
        } => {
            let mut progress = ProgressOptions::new();
            if let Some(format) = bar_format {
                progress = progress.bar_format(format);
            }
            if let Some(desc) = desc {
                progress = progress.desc(desc);
            }

            for step in Loggable::progress(0..count, level, progress)? {
                thread::sleep(Duration::from_millis(50));
                log.debug(format!("step {step} done"));
            }
            log.info(format!("{count} steps finished"));
        }
    }

    Ok(())
}
