use replikv::{
    ClientSession, Directory, DirectoryClient, DirectoryNode, KvClient, KvNode, NodeOptions, NodeStartError,
    PickerAlgorithm, PutInput, RemotePutError, Role,
};
use slog::Drain;
use std::error::Error;
use tokio::time::{Duration, Instant};

const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::test]
async fn put_on_primary_is_readable_everywhere() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(7100, 3).await?;

    let primary = KvClient::connect(test_logger("client"), &cluster.kv_addr(1)).await?;
    let output = primary.put(put_input("color", "blue")).await?;
    assert_eq!("kv1", output.responder_id.as_str());

    // Replication completes before the put returns.
    for i in 1..=3 {
        let client = KvClient::connect(test_logger("client"), &cluster.kv_addr(i)).await?;
        let output = client.get("color").await?;
        assert_eq!(Some("blue".to_string()), output.value, "kv{}", i);
        assert_eq!(format!("kv{}", i), output.responder_id.as_str());
    }

    let missing = primary.get("shape").await?;
    assert!(!missing.found());

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn put_on_either_backup_redirects_to_primary() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(7200, 3).await?;
    let primary = KvClient::connect(test_logger("client"), &cluster.kv_addr(1)).await?;

    for i in 2..=3 {
        let key = format!("k{}", i);
        let backup = KvClient::connect(test_logger("client"), &cluster.kv_addr(i)).await?;
        let redirect_to = match backup.put(put_input(&key, "v")).await {
            Err(RemotePutError::NotPrimary(info)) => {
                assert_eq!(format!("kv{}", i), info.responder_id.as_str());
                info.redirect_to.expect("backup should know the primary")
            }
            other => panic!("Expected NotPrimary from kv{}, got {:?}", i, other),
        };
        assert_eq!(cluster.kv_addr(1), redirect_to);

        // The rejected put changed nothing.
        assert!(!backup.get(&key).await?.found());

        primary.put(put_input(&key, "v")).await?;
        assert_eq!(Some("v".to_string()), backup.get(&key).await?.value);
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn shutdown_deregisters_kv_nodes() -> Result<(), Box<dyn Error>> {
    let mut cluster = Cluster::start(7500, 2).await?;
    let registry = cluster.directory.directory().clone();

    let registered = registry.lookup("kv").await?;
    let ids: Vec<_> = registered.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(vec!["kv1", "kv2"], ids);
    assert_eq!(Some(&"kv".to_string()), registered[0].meta.get("kind"));

    let kv2 = cluster.kv_nodes.remove(1);
    kv2.shutdown().await;

    let ids: Vec<_> = registry
        .lookup("kv")
        .await?
        .into_iter()
        .map(|i| i.id.into_inner())
        .collect();
    assert_eq!(vec!["kv1".to_string()], ids);

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn client_session_follows_one_redirect() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(7300, 3).await?;

    let directory = DirectoryClient::connect(test_logger("client"), &cluster.directory_addr()).await?;
    let session = ClientSession::start(test_logger("client"), &directory, "kv", PickerAlgorithm::RoundRobin).await?;
    assert_eq!(3, session.instances().len());

    // Round robin: kv1, kv2, kv3.
    let mut redirects = Vec::new();
    for i in 0..3 {
        let outcome = session.put(put_input(&format!("key-{}", i), "v")).await?;
        assert_eq!("kv1", outcome.responder_id.as_str());
        redirects.push(outcome.redirected_to);
    }
    assert_eq!(None, redirects[0]);
    assert_eq!(Some(cluster.kv_addr(1)), redirects[1]);
    assert_eq!(Some(cluster.kv_addr(1)), redirects[2]);

    for i in 0..3 {
        let outcome = session.get(&format!("key-{}", i)).await?;
        assert_eq!(Some("v".to_string()), outcome.value);
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn late_joiner_catches_up() -> Result<(), Box<dyn Error>> {
    let mut cluster = Cluster::start(7400, 2).await?;

    let primary = KvClient::connect(test_logger("client"), &cluster.kv_addr(1)).await?;
    primary.put(put_input("a", "1")).await?;
    primary.put(put_input("b", "2")).await?;

    cluster.add_kv_node(3).await?;
    cluster.wait_for_roles(Duration::from_secs(10)).await;

    let deadline = Instant::now() + Duration::from_secs(10);
    let joiner = cluster.kv_nodes[2].store().clone();
    while joiner.get("b").value.is_none() {
        assert!(Instant::now() < deadline, "late joiner never bootstrapped");
        tokio::time::sleep(REFRESH_INTERVAL).await;
    }
    assert_eq!(Some("1".to_string()), joiner.get("a").value);

    cluster.shutdown().await;
    Ok(())
}

struct Cluster {
    port_base: u16,
    directory: DirectoryNode,
    kv_nodes: Vec<KvNode>,
}

impl Cluster {
    /// Directory on `port_base`, kvN on `port_base + N`.
    async fn start(port_base: u16, num_kv_nodes: u16) -> Result<Self, Box<dyn Error>> {
        let directory = replikv::start_directory(replikv::DirectoryNodeConfig {
            logger: test_logger("directory"),
            listen_addr: format!("127.0.0.1:{}", port_base).parse()?,
            options: NodeOptions::default(),
        })?;

        let mut cluster = Cluster {
            port_base,
            directory,
            kv_nodes: Vec::new(),
        };
        for i in 1..=num_kv_nodes {
            cluster.add_kv_node(i).await?;
        }
        cluster.wait_for_roles(Duration::from_secs(10)).await;

        Ok(cluster)
    }

    fn directory_addr(&self) -> String {
        format!("127.0.0.1:{}", self.port_base)
    }

    fn kv_addr(&self, i: u16) -> String {
        format!("127.0.0.1:{}", self.port_base + i)
    }

    async fn add_kv_node(&mut self, i: u16) -> Result<(), Box<dyn Error>> {
        let id = format!("kv{}", i);
        let deadline = Instant::now() + Duration::from_secs(10);

        // The directory server may still be binding.
        loop {
            let config = replikv::KvNodeConfig {
                logger: test_logger(&id),
                instance_id: id.clone(),
                listen_addr: self.kv_addr(i).parse()?,
                public_addr: self.kv_addr(i),
                directory_addr: self.directory_addr(),
                service: "kv".to_string(),
                weight: 1,
                forced_primary_id: None,
                options: NodeOptions {
                    role_refresh_interval: Some(REFRESH_INTERVAL),
                    shutdown_grace_period: Some(Duration::from_secs(1)),
                },
            };

            match replikv::start_kv_node(config).await {
                Ok(node) => {
                    self.kv_nodes.push(node);
                    return Ok(());
                }
                Err(NodeStartError::DirectoryConnect(_)) if Instant::now() < deadline => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Wait until kv1 is primary and everybody else follows it.
    async fn wait_for_roles(&self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        let primary_addr = self.kv_addr(1);

        loop {
            let converged = self.kv_nodes.iter().all(|node| {
                let role_state = node.store().role_state();
                let expected_role = if node.instance_id().as_str() == "kv1" {
                    Role::Primary
                } else {
                    Role::Backup
                };
                role_state.role == expected_role && role_state.primary_addr() == Some(primary_addr.as_str())
            });
            if converged {
                return;
            }

            assert!(Instant::now() < deadline, "Timeout waiting for roles to converge");
            tokio::time::sleep(REFRESH_INTERVAL / 2).await;
        }
    }

    async fn shutdown(self) {
        for node in self.kv_nodes {
            node.shutdown().await;
        }
        self.directory.shutdown().await;
    }
}

fn put_input(key: &str, value: &str) -> PutInput {
    PutInput {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn test_logger(node_id: &str) -> slog::Logger {
    create_root_logger_for_stdout(node_id.to_string())
}

fn create_root_logger_for_stdout(node_id: String) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("NodeId" => node_id))
}
