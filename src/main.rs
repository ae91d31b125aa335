use coffeeshop_environment::environment::{self, Environment, EnvironmentError, Target};
use std::{env, process, str::FromStr};
use thiserror::Error;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Command-line error.
#[derive(Debug, Error)]
enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("unsupported output format: {0} (expected json or yaml)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// Output format for the rendered environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Format {
    #[default]
    Json,
    Yaml,
}

impl FromStr for Format {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(CliError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    target: Option<String>,
    config: Option<String>,
    format: Format,
    log_level: Option<String>,
}

fn parse_args<I>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--env=") {
            parsed.target = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--config=") {
            parsed.config = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--format=") {
            parsed.format = value.parse()?;
        } else if let Some(value) = arg.strip_prefix("--log-level=") {
            parsed.log_level = Some(value.to_string());
        } else {
            return Err(CliError::UnknownArgument(arg));
        }
    }
    Ok(parsed)
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // stdout carries the rendered environment
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Resolve the environment: `--config` wins over `--env`, which wins over `APP_ENV`.
fn resolve<F>(args: &Args, lookup: F) -> Result<Environment, EnvironmentError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = &args.config {
        info!(config = %path, "loading environment file");
        return Environment::load_with(path, lookup);
    }

    let target = match &args.target {
        Some(name) => name.parse::<Target>()?,
        None => Target::from_lookup(lookup)?,
    };

    info!(target = %target, "using built-in environment");
    Ok(target.environment())
}

fn render(environment: &Environment, format: Format) -> Result<String, EnvironmentError> {
    match format {
        Format::Json => environment.to_json(),
        Format::Yaml => environment.to_yaml(),
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let resolved = resolve(args, |key| env::var(key).ok())?;
    let active = environment::active::init(resolved)?;

    info!(
        production = active.production(),
        api_server_url = %active.api_server_url(),
        auth0_url = %active.auth0().url(),
        "environment ready"
    );

    Ok(render(active, args.format)?)
}

fn main() {
    dotenvy::dotenv().ok();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            init_tracing(None);
            error!(error = %e, "invalid arguments");
            process::exit(2);
        }
    };
    init_tracing(args.log_level.as_deref());

    match run(&args) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            error!(error = %e, "failed to resolve environment");
            process::exit(1);
        }
    }
}
