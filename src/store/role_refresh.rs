use crate::store::store::ReplicatedStore;
use std::sync::{Arc, Weak};
use tokio::time::Duration;

/// RoleRefreshHandle keeps the background role refresh alive. Dropping it stops the task after
/// its current iteration.
pub struct RoleRefreshHandle {
    _alive: Arc<()>,
}

struct RoleRefreshTask {
    logger: slog::Logger,
    alive: Weak<()>,
    store: Weak<ReplicatedStore>,
    interval: Duration,
}

impl RoleRefreshHandle {
    pub fn spawn_refresh_task(logger: slog::Logger, store: &Arc<ReplicatedStore>, interval: Duration) -> Self {
        // Add minimal logic in this constructor, as it is untested.
        let (task, handle) = RoleRefreshTask::new(logger, store, interval);
        tokio::task::spawn(task.run());

        handle
    }
}

impl RoleRefreshTask {
    fn new(logger: slog::Logger, store: &Arc<ReplicatedStore>, interval: Duration) -> (Self, RoleRefreshHandle) {
        let alive = Arc::new(());
        let task = RoleRefreshTask {
            logger,
            alive: Arc::downgrade(&alive),
            store: Arc::downgrade(store),
            interval,
        };

        (task, RoleRefreshHandle { _alive: alive })
    }

    async fn run(self) {
        // The first refresh runs immediately, so a new node learns its role without waiting a
        // full interval.
        loop {
            if self.alive.upgrade().is_none() {
                return;
            }
            let store = match self.store.upgrade() {
                Some(store) => store,
                None => return,
            };

            if let Err(e) = store.refresh_role().await {
                slog::warn!(self.logger, "Role refresh failed: {}", e);
            }
            drop(store);

            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::role::Role;
    use crate::store::test_utils::TestCluster;

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[tokio::test]
    async fn first_refresh_is_immediate() {
        let cluster = TestCluster::with_members(2).await;
        let store = cluster.store("kv2").clone();

        let (task, _handle) = RoleRefreshTask::new(test_logger(), &store, Duration::from_secs(3600));
        tokio::task::spawn(task.run());

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while store.role_state().role != Role::Backup {
            assert!(tokio::time::Instant::now() < deadline, "role never refreshed");
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(Some("kv1:9301"), store.role_state().primary_addr());
    }

    #[tokio::test]
    async fn task_exits_when_handle_dropped() {
        let cluster = TestCluster::with_members(1).await;
        let store = cluster.store("kv1").clone();

        let (task, handle) = RoleRefreshTask::new(test_logger(), &store, Duration::from_millis(10));
        let join_handle = tokio::task::spawn(task.run());
        tokio::time::sleep(Duration::from_millis(30)).await;

        drop(handle);

        tokio::time::timeout(Duration::from_secs(5), join_handle)
            .await
            .expect("refresh task didn't exit")
            .unwrap();
        assert_eq!(Role::Primary, store.role_state().role);
    }

    #[tokio::test]
    async fn task_exits_when_store_dropped() {
        let mut cluster = TestCluster::new();
        let store = cluster.join("kv1", None).await;
        cluster.stores.clear();

        let (task, _handle) = RoleRefreshTask::new(test_logger(), &store, Duration::from_millis(10));
        drop(store);

        tokio::time::timeout(Duration::from_secs(5), task.run())
            .await
            .expect("refresh task didn't exit");
    }
}
