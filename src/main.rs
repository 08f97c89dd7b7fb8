use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use retreat_booking::application::script::execute;
use retreat_booking::application::wizard::ReservationWizard;
use retreat_booking::config::BookingConfig;
use retreat_booking::infrastructure::concierge::{Concierge, DEFAULT_REPLY_DELAY};
use retreat_booking::infrastructure::gateway::SimulatedGateway;
use retreat_booking::infrastructure::notifier::TracingNotifier;
use retreat_booking::interfaces::csv::confirmation_writer::ConfirmationWriter;
use retreat_booking::interfaces::csv::script_reader::ScriptReader;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a booking script through the reservation wizard
    Book {
        /// Booking script CSV file (action, field, value)
        script: PathBuf,

        /// Simulated gateway latency in milliseconds
        #[arg(long)]
        latency_ms: Option<u64>,

        /// Probability in [0, 1] that the simulated gateway declines
        #[arg(long)]
        failure_rate: Option<f64>,

        /// Seed for the simulated gateway's decline draw
        #[arg(long)]
        seed: Option<u64>,

        /// Date to treat as today (YYYY-MM-DD) when validating check-in
        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Ask the concierge chat a question
    Chat {
        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,

        /// Seed for reply selection
        #[arg(long)]
        seed: Option<u64>,

        /// Reply delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn init_tracing(config: &BookingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BookingConfig::load(path).into_diagnostic()?,
        None => BookingConfig::default(),
    };
    init_tracing(&config);

    match cli.command {
        Command::Book {
            script,
            latency_ms,
            failure_rate,
            seed,
            today,
            format,
        } => {
            let mut settings = config.gateway_settings();
            if let Some(ms) = latency_ms {
                settings.latency = Duration::from_millis(ms);
            }
            if let Some(rate) = failure_rate {
                settings.failure_rate = rate;
            }
            if seed.is_some() {
                settings.seed = seed;
            }
            let mut options = config.wizard_options();
            if let Some(today) = today {
                options.today = today;
            }

            let mut wizard = ReservationWizard::with_options(
                Arc::new(SimulatedGateway::new(settings)),
                Box::new(TracingNotifier),
                options,
            );

            let file = File::open(script).into_diagnostic()?;
            for command in ScriptReader::new(file).commands() {
                match command {
                    Ok(command) => {
                        if let Err(e) = execute(&mut wizard, command).await {
                            eprintln!("Rejected: {}", e);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error reading command: {}", e);
                    }
                }
            }

            let step = wizard.current_step();
            let Some(view) = wizard.confirmation().cloned() else {
                miette::bail!("Reservation was not confirmed (stopped on step {step})");
            };
            wizard.unmount();

            match format {
                OutputFormat::Csv => {
                    let stdout = io::stdout();
                    let mut writer = ConfirmationWriter::new(stdout.lock());
                    writer.write_confirmation(&view).into_diagnostic()?;
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view).into_diagnostic()?);
                }
            }
        }
        Command::Chat {
            messages,
            seed,
            delay_ms,
        } => {
            let delay = delay_ms.map_or(DEFAULT_REPLY_DELAY, Duration::from_millis);
            let mut concierge = match seed {
                Some(seed) => Concierge::seeded(seed, delay),
                None => Concierge::seeded(rand::random(), delay),
            };

            println!("{}", concierge.greeting());
            for message in messages {
                if let Some(reply) = concierge.reply(&message).await {
                    println!("> {message}");
                    println!("{reply}");
                }
            }
        }
    }

    Ok(())
}
