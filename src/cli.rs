use clap::{Args, Parser, Subcommand};
use replikv::PickerAlgorithm;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the service directory.
    Directory(DirectoryArgs),
    /// Run a replicated KV server and register it with the directory.
    Kv(KvArgs),
    /// Resolve the KV service once and send puts and gets through a load balancing picker.
    Client(ClientArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DirectoryArgs {
    #[arg(long, default_value = "0.0.0.0:9000")]
    pub listen: SocketAddr,
}

#[derive(Args, Debug, Clone)]
pub struct KvArgs {
    #[arg(long, default_value = "0.0.0.0:9301")]
    pub listen: SocketAddr,

    #[arg(long, default_value = "127.0.0.1:9000")]
    pub directory: String,

    /// Defaults to `kv-<unix seconds>`.
    #[arg(long, env = "INSTANCE_ID")]
    pub id: Option<String>,

    /// Address registered in the directory. Defaults to the listen address.
    #[arg(long, env = "PUBLIC_ADDR")]
    pub public: Option<String>,

    #[arg(long, env = "WEIGHT", default_value_t = 1)]
    pub weight: i64,

    /// This instance is primary whenever it is registered.
    #[arg(long, env = "PRIMARY_ID")]
    pub primary_id: Option<String>,

    #[arg(long, default_value = "kv")]
    pub service: String,
}

impl KvArgs {
    /// `--public`, or the listen address if unset.
    pub fn public_addr(&self) -> String {
        match &self.public {
            Some(public) => public.clone(),
            None => self.listen.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    #[arg(long, default_value = "127.0.0.1:9000")]
    pub directory: String,

    #[arg(long, default_value = "kv")]
    pub service: String,

    /// One of: random, rr, wrr.
    #[arg(long, default_value = "rr")]
    pub algo: PickerAlgorithm,

    /// Number of put+get rounds.
    #[arg(short = 'n', default_value_t = 20)]
    pub count: usize,

    #[arg(long, default_value_t = 200)]
    pub sleep_ms: u64,
}
