//! livy-batch: submit, inspect and clean up Livy batch jobs from the shell.
//!
//! Usage:
//!   livy-batch submit --file <path> [--class-name <cls>] [--arg <a>]... [--wait] [--logs]
//!   livy-batch submit --request <job.yaml>
//!   livy-batch state <id>
//!   livy-batch get <id>
//!   livy-batch logs <id>
//!   livy-batch wait <id> [--interval-secs <n>]
//!   livy-batch delete <id>

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use livy_batch::{
    ConnectionRegistry, LivyClient, RetryPolicy, SessionId, SubmissionRequest, TracingLogSink,
    DEFAULT_CONNECTION_ID,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "livy-batch")]
#[command(about = "Submit, poll, read logs of and delete Livy batch jobs", version)]
struct Cli {
    /// Connection id to resolve (LIVY_CONN_<ID> or the connections file)
    #[arg(long, global = true, default_value = DEFAULT_CONNECTION_ID)]
    conn: String,

    /// Connections file; defaults to $LIVY_CONNECTIONS_FILE
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Livy base URL, bypassing connection lookup
    #[arg(long, global = true)]
    url: Option<String>,

    /// Extra request header, KEY=VALUE (repeatable)
    #[arg(long = "header", global = true, value_parser = parse_header)]
    headers: Vec<(String, String)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a batch and print its session id
    Submit(SubmitArgs),
    /// Print the batch description as JSON
    Get { id: String },
    /// Print the batch state
    State {
        id: String,
        /// Retry transient failures up to this many attempts
        #[arg(long)]
        retries: Option<u32>,
    },
    /// Dump the whole batch log
    Logs { id: String },
    /// Poll until the batch reaches a terminal state
    Wait {
        id: String,
        #[arg(long, default_value_t = 10)]
        interval_secs: u64,
    },
    /// Kill and delete the batch
    Delete { id: String },
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// JSON or YAML file holding the whole submission request
    #[arg(long, conflicts_with = "file")]
    request: Option<PathBuf>,

    /// Application artifact to run
    #[arg(long, required_unless_present = "request")]
    file: Option<String>,
    #[arg(long)]
    class_name: Option<String>,
    #[arg(long = "arg")]
    args: Vec<String>,
    #[arg(long = "jar")]
    jars: Vec<String>,
    #[arg(long = "py-file")]
    py_files: Vec<String>,
    #[arg(long = "extra-file")]
    files: Vec<String>,
    #[arg(long = "archive")]
    archives: Vec<String>,
    #[arg(long)]
    driver_memory: Option<String>,
    #[arg(long)]
    driver_cores: Option<String>,
    #[arg(long)]
    executor_memory: Option<String>,
    #[arg(long)]
    executor_cores: Option<String>,
    #[arg(long)]
    num_executors: Option<String>,
    #[arg(long)]
    queue: Option<String>,
    #[arg(long)]
    proxy_user: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Spark configuration entry, KEY=VALUE (repeatable)
    #[arg(long = "conf", value_parser = parse_header)]
    conf: Vec<(String, String)>,

    /// Wait for the batch to finish after submitting
    #[arg(long)]
    wait: bool,
    /// Dump the batch log once it finished (implies --wait)
    #[arg(long)]
    logs: bool,
    #[arg(long, default_value_t = 10)]
    interval_secs: u64,
}

fn parse_header(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

fn build_client(cli: &Cli) -> Result<LivyClient> {
    let mut builder = LivyClient::builder();
    builder = match &cli.url {
        Some(url) => builder.base_url(url),
        None => {
            let registry = match &cli.config {
                Some(path) => ConnectionRegistry::from_path(path)?,
                None => ConnectionRegistry::from_env()?,
            };
            builder.connection(registry.resolve(&cli.conn)?)
        }
    };
    for (name, value) in &cli.headers {
        builder = builder.header(name, value);
    }
    Ok(builder.build()?)
}

fn load_request(path: &Path) -> Result<SubmissionRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = if path.extension().map(|e| e == "json").unwrap_or(false) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(SubmissionRequest::from_value(value)?)
}

fn request_from_args(args: &SubmitArgs) -> Result<SubmissionRequest> {
    if let Some(path) = &args.request {
        return load_request(path);
    }
    let file = args
        .file
        .clone()
        .ok_or_else(|| anyhow!("--file or --request is required"))?;

    let mut request = SubmissionRequest::new(file)
        .args(args.args.iter().map(String::as_str))
        .jars(args.jars.iter().cloned())
        .py_files(args.py_files.iter().cloned())
        .files(args.files.iter().cloned())
        .archives(args.archives.iter().cloned());
    request.class_name = args.class_name.clone();
    request.driver_memory = args.driver_memory.clone();
    request.executor_memory = args.executor_memory.clone();
    request.driver_cores = args.driver_cores.as_deref().map(Into::into);
    request.executor_cores = args.executor_cores.as_deref().map(Into::into);
    request.num_executors = args.num_executors.as_deref().map(Into::into);
    request.queue = args.queue.clone();
    request.proxy_user = args.proxy_user.clone();
    request.name = args.name.clone();
    for (key, value) in &args.conf {
        request = match value.parse::<i64>() {
            Ok(n) => request.conf_entry(key, n),
            Err(_) => request.conf_entry(key, value.as_str()),
        };
    }
    Ok(request)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match &cli.command {
        Command::Submit(args) => {
            let request = request_from_args(args)?;
            let id = client.submit_batch(&request)?;
            println!("{}", id);
            if args.wait || args.logs {
                let state = client.poll_for_termination(
                    id,
                    Duration::from_secs(args.interval_secs),
                    None,
                )?;
                if args.logs {
                    client.dump_batch_logs(id, &TracingLogSink)?;
                }
                println!("{}", state);
            }
        }
        Command::Get { id } => {
            let batch = client.get_batch(SessionId::parse(id)?)?;
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        Command::State { id, retries } => {
            let retry = retries.map(|n| RetryPolicy::new().with_max_attempts(n));
            let state = client.get_batch_state(SessionId::parse(id)?, retry.as_ref())?;
            println!("{}", state);
        }
        Command::Logs { id } => {
            client.dump_batch_logs(SessionId::parse(id)?, &|line: &str| println!("{}", line))?;
        }
        Command::Wait { id, interval_secs } => {
            let state = client.poll_for_termination(
                SessionId::parse(id)?,
                Duration::from_secs(*interval_secs),
                None,
            )?;
            println!("{}", state);
        }
        Command::Delete { id } => {
            let response = client.delete_batch(SessionId::parse(id)?)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
