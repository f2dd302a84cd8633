use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use recoverykit::boundary::{
    Boundary, BoundaryConfig, BoundaryUpdate, BoundaryVariant, DispatchOutcome, NavigationLog,
    Rendered,
};
use recoverykit::error::{ErrorClassifier, ErrorKind, Failure, MessageDetector};
use recoverykit::logging::{init_logging, LoggingConfig};
use recoverykit::recovery::{RecoveryActionType, RecoveryPlanner, RecoveryUrls};
use recoverykit::surface::SurfaceRenderer;

/// Boundary flavour selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliVariant {
    /// Whole-page boundary: fixed delay, details panel
    Page,
    /// Data-section boundary: exponential backoff, health badge
    Service,
}

impl From<CliVariant> for BoundaryVariant {
    fn from(variant: CliVariant) -> Self {
        match variant {
            CliVariant::Page => BoundaryVariant::Page,
            CliVariant::Service => BoundaryVariant::Service,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "recoverykit")]
#[command(version)]
#[command(about = "Classify failures, plan recovery actions and simulate retrying boundaries")]
struct Cli {
    /// Suppress all logging except warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    verbose: u8,

    /// Disable colors (also respects NO_COLOR environment variable)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a failure and print its metadata as JSON
    Classify {
        /// Transport status code carried by the failure
        #[arg(long, short)]
        status: Option<u16>,

        /// Failure message
        #[arg(long, short, default_value = "request failed")]
        message: String,

        /// Endpoint that produced the failure
        #[arg(long)]
        endpoint: Option<String>,

        /// Classify status-less failures from their message
        #[arg(long)]
        detect_messages: bool,
    },
    /// Print the ordered recovery actions for a kind as JSON
    Plan {
        /// Error kind (not-found, unauthorized, server-error, ...)
        #[arg(long, short, value_parser = parse_kind)]
        kind: ErrorKind,

        #[arg(long)]
        home_url: Option<String>,

        #[arg(long)]
        login_url: Option<String>,

        #[arg(long)]
        contact_url: Option<String>,

        #[arg(long)]
        status_page_url: Option<String>,
    },
    /// Mount a boundary around a component that fails a number of times
    Simulate {
        /// Status code of each simulated failure
        #[arg(long, short, default_value = "503")]
        status: u16,

        /// How many renders fail before the component succeeds
        #[arg(long, short, default_value = "1")]
        failures: u32,

        /// Boundary configuration file (TOML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Boundary variant (overrides the configuration file)
        #[arg(long, value_enum)]
        variant: Option<CliVariant>,

        /// Enable automatic retry
        #[arg(long)]
        auto_retry: bool,

        /// Retry delay in milliseconds
        #[arg(long, value_name = "MS")]
        retry_delay_ms: Option<u64>,

        /// Attempt budget
        #[arg(long)]
        max_retries: Option<u32>,

        /// Press "Try again" whenever no automatic retry is pending
        #[arg(long)]
        manual: bool,
    },
}

fn parse_kind(value: &str) -> Result<ErrorKind, String> {
    ErrorKind::parse(value).ok_or_else(|| {
        let known: Vec<&str> = ErrorKind::ALL.iter().map(|kind| kind.as_str()).collect();
        format!("unknown kind '{}', expected one of: {}", value, known.join(", "))
    })
}

/// Exit codes for the simulate command
mod exit_codes {
    use std::process::ExitCode;

    /// The component rendered
    pub fn recovered() -> ExitCode {
        ExitCode::SUCCESS
    }

    /// The boundary still holds a failure and nothing will retry it
    pub fn unrecovered() -> ExitCode {
        ExitCode::from(2)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_flags(cli.verbose, cli.quiet).with_target(false));

    let use_color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();

    match cli.command {
        Commands::Classify {
            status,
            message,
            endpoint,
            detect_messages,
        } => {
            let mut failure = Failure::new(message);
            if let Some(status) = status {
                failure = failure.with_status(status);
            }
            if let Some(endpoint) = endpoint {
                failure = failure.with_endpoint(endpoint);
            }

            let mut classifier = ErrorClassifier::new();
            if detect_messages {
                classifier = classifier.with_detector(MessageDetector::new());
            }
            let metadata = classifier.classify(&failure);
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Plan {
            kind,
            home_url,
            login_url,
            contact_url,
            status_page_url,
        } => {
            let urls = RecoveryUrls {
                home: home_url,
                login: login_url,
                contact: contact_url,
                status_page: status_page_url,
            };
            let actions = RecoveryPlanner::new(urls).plan(kind);
            println!("{}", serde_json::to_string_pretty(&actions)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Simulate {
            status,
            failures,
            config,
            variant,
            auto_retry,
            retry_delay_ms,
            max_retries,
            manual,
        } => {
            let mut boundary_config = match config {
                Some(path) => BoundaryConfig::load(&path)?,
                None => BoundaryConfig::new(),
            };
            if let Some(variant) = variant {
                boundary_config.variant = variant.into();
            }
            if auto_retry {
                boundary_config.enable_auto_retry = true;
            }
            if let Some(delay) = retry_delay_ms {
                boundary_config.retry_delay_ms = delay;
            }
            if let Some(max) = max_retries {
                boundary_config.max_retries = max;
            }
            boundary_config.enable_analytics = true;
            boundary_config.validate()?;

            let renderer = SurfaceRenderer::new().with_colors(use_color);
            Ok(simulate(boundary_config, status, failures, manual, &renderer).await)
        }
    }
}

async fn simulate(
    config: BoundaryConfig,
    status: u16,
    failures: u32,
    manual: bool,
    renderer: &SurfaceRenderer,
) -> ExitCode {
    let navigation = NavigationLog::new();
    let mut boundary = Boundary::builder(config)
        .with_router(navigation.clone())
        .with_platform(navigation)
        .on_analytics_event(|event| {
            if let Ok(json) = serde_json::to_string(event) {
                println!("analytics {}", json);
            }
        })
        .build();

    let mut remaining = failures;
    let mut component = move || {
        if remaining > 0 {
            remaining -= 1;
            Err(Failure::with_status_code(status, "simulated failure"))
        } else {
            Ok("component rendered")
        }
    };

    loop {
        match boundary.render(&mut component) {
            Rendered::Content(text) => {
                println!("{}", text);
                return exit_codes::recovered();
            }
            Rendered::Surface(surface) => print!("{}", renderer.render(&surface)),
            Rendered::Custom(text) => println!("{}", text),
            Rendered::LastResort(message) => println!("{}", message),
        }

        let mut retried = false;
        while let Some(update) = boundary.next_event().await {
            match update {
                BoundaryUpdate::Countdown { remaining_seconds } => {
                    println!("countdown {}", remaining_seconds);
                }
                BoundaryUpdate::AutoRetried { attempt } => {
                    println!("auto retry {}", attempt);
                    retried = true;
                    break;
                }
                BoundaryUpdate::ManualRetried { attempt } => {
                    println!("manual retry {}", attempt);
                    retried = true;
                    break;
                }
                BoundaryUpdate::Reset => {
                    retried = true;
                    break;
                }
                BoundaryUpdate::ConnectivityChanged { online } => {
                    println!("online {}", online);
                }
            }
        }
        if retried {
            continue;
        }

        let state = boundary.state();
        if manual && state.retry_attempt < boundary.config().max_retries {
            match boundary.dispatch(RecoveryActionType::Retry) {
                DispatchOutcome::RetryPending { .. } | DispatchOutcome::Reset => continue,
                outcome => println!("retry not offered ({:?})", outcome),
            }
        }

        println!("giving up after {} attempt(s)", state.retry_attempt);
        return exit_codes::unrecovered();
    }
}
