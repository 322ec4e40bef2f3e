mod cli;

use clap::Parser;
use cli::{ClientArgs, Cli, Command, DirectoryArgs, KvArgs};
use replikv::{
    ClientSession, DirectoryClient, DirectoryNodeConfig, KvNodeConfig, NodeOptions, PutInput, SessionError,
};
use slog::Drain;
use std::error::Error;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let logger = create_root_logger_for_stdout();

    let result = match cli.command {
        Command::Directory(args) => run_directory(logger.clone(), args).await,
        Command::Kv(args) => run_kv(logger.clone(), args).await,
        Command::Client(args) => run_client(logger.clone(), args).await,
    };
    if let Err(e) = &result {
        slog::crit!(logger, "Fatal: {}", e);
    }

    result
}

async fn run_directory(logger: slog::Logger, args: DirectoryArgs) -> Result<(), Box<dyn Error>> {
    let node = replikv::start_directory(DirectoryNodeConfig {
        logger: logger.clone(),
        listen_addr: args.listen,
        options: NodeOptions::default(),
    })?;

    wait_for_shutdown_signal(&logger).await;
    node.shutdown().await;

    Ok(())
}

async fn run_kv(logger: slog::Logger, args: KvArgs) -> Result<(), Box<dyn Error>> {
    let public_addr = args.public_addr();
    let instance_id = args.id.unwrap_or_else(default_instance_id);

    let node = replikv::start_kv_node(KvNodeConfig {
        logger: logger.clone(),
        instance_id,
        listen_addr: args.listen,
        public_addr,
        directory_addr: args.directory,
        service: args.service,
        weight: args.weight,
        forced_primary_id: args.primary_id,
        options: NodeOptions::default(),
    })
    .await?;

    wait_for_shutdown_signal(&logger).await;
    node.shutdown().await;

    Ok(())
}

async fn run_client(logger: slog::Logger, args: ClientArgs) -> Result<(), Box<dyn Error>> {
    let directory = DirectoryClient::connect(logger.clone(), &args.directory).await?;
    let session = ClientSession::start(logger.clone(), &directory, &args.service, args.algo).await?;

    println!(
        "Resolved {} instance(s) of {:?}, picking with {}",
        session.instances().len(),
        session.service(),
        session.picker_name()
    );

    for i in 0..args.count {
        let key = format!("key-{}", i);
        let put_input = PutInput {
            key: key.clone(),
            value: format!("value-{}", i),
        };

        match session.put(put_input).await {
            Ok(outcome) => match outcome.redirected_to {
                Some(primary) => println!(
                    "put {} picked={} redirected_to={} responder={}",
                    key, outcome.picked.id, primary, outcome.responder_id
                ),
                None => println!("put {} picked={} responder={}", key, outcome.picked.id, outcome.responder_id),
            },
            Err(e) => report_session_error("put", &key, e)?,
        }

        match session.get(&key).await {
            Ok(outcome) => println!(
                "get {} picked={} responder={} value={:?}",
                key, outcome.picked.id, outcome.responder_id, outcome.value
            ),
            Err(e) => report_session_error("get", &key, e)?,
        }

        tokio::time::sleep(Duration::from_millis(args.sleep_ms)).await;
    }

    println!("Session ended without refreshing the directory; instances that joined meanwhile were never picked.");
    Ok(())
}

/// Request failures are printed and the session goes on. Running out of instances ends it.
fn report_session_error(op: &str, key: &str, e: SessionError) -> Result<(), SessionError> {
    match e {
        SessionError::Pick(_) | SessionError::NoInstances(_) => Err(e),
        e => {
            eprintln!("{} {} failed: {}", op, key, e);
            Ok(())
        }
    }
}

fn default_instance_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("kv-{}", secs)
}

async fn wait_for_shutdown_signal(logger: &slog::Logger) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                slog::warn!(logger, "Can't listen for SIGTERM, only ctrl-c will stop us: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    slog::info!(logger, "Shutting down");
}

fn create_root_logger_for_stdout() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
