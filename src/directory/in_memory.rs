use crate::directory::{Directory, DirectoryError};
use crate::instance::{Instance, InstanceId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// InMemoryDirectory is the registry itself: service -> instance ID -> instance.
#[derive(Default)]
pub struct InMemoryDirectory {
    services: RwLock<HashMap<String, HashMap<InstanceId, Instance>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Directory for InMemoryDirectory {
    async fn register(&self, service: &str, instance: Instance) -> Result<(), DirectoryError> {
        if service.is_empty() {
            return Err(DirectoryError::InvalidArgument("service name is empty"));
        }
        if instance.id.as_str().is_empty() {
            return Err(DirectoryError::InvalidArgument("instance ID is empty"));
        }
        if instance.addr.is_empty() {
            return Err(DirectoryError::InvalidArgument("instance address is empty"));
        }

        self.services
            .write()
            .entry(service.to_string())
            .or_default()
            .insert(instance.id.clone(), instance);

        Ok(())
    }

    async fn deregister(&self, service: &str, id: &InstanceId) -> Result<(), DirectoryError> {
        if service.is_empty() {
            return Err(DirectoryError::InvalidArgument("service name is empty"));
        }
        if id.as_str().is_empty() {
            return Err(DirectoryError::InvalidArgument("instance ID is empty"));
        }

        let mut services = self.services.write();
        if let Some(instances) = services.get_mut(service) {
            instances.remove(id);
            if instances.is_empty() {
                services.remove(service);
            }
        }

        Ok(())
    }

    async fn lookup(&self, service: &str) -> Result<Vec<Instance>, DirectoryError> {
        if service.is_empty() {
            return Err(DirectoryError::InvalidArgument("service name is empty"));
        }

        let mut instances: Vec<Instance> = match self.services.read().get(service) {
            Some(instances) => instances.values().cloned().collect(),
            None => return Ok(Vec::new()),
        };

        instances.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.addr.cmp(&b.addr)));
        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(instances: &[Instance]) -> Vec<&str> {
        instances.iter().map(|inst| inst.id.as_str()).collect()
    }

    #[tokio::test]
    async fn lookup_is_sorted_by_id() {
        let directory = InMemoryDirectory::new();
        for id in &["kv3", "kv1", "kv2"] {
            directory
                .register("kv", Instance::new(*id, format!("{}:9301", id), 1))
                .await
                .unwrap();
        }

        let instances = directory.lookup("kv").await.unwrap();

        assert_eq!(vec!["kv1", "kv2", "kv3"], ids(&instances));
    }

    #[tokio::test]
    async fn register_replaces_same_id() {
        let directory = InMemoryDirectory::new();
        directory.register("kv", Instance::new("kv1", "old:1", 1)).await.unwrap();
        directory.register("kv", Instance::new("kv1", "new:1", 3)).await.unwrap();

        let instances = directory.lookup("kv").await.unwrap();

        assert_eq!(vec![Instance::new("kv1", "new:1", 3)], instances);
    }

    #[tokio::test]
    async fn services_are_isolated() {
        let directory = InMemoryDirectory::new();
        directory.register("kv", Instance::new("kv1", "kv1:1", 1)).await.unwrap();
        directory.register("echo", Instance::new("echo1", "echo1:1", 1)).await.unwrap();

        assert_eq!(vec!["kv1"], ids(&directory.lookup("kv").await.unwrap()));
        assert_eq!(vec!["echo1"], ids(&directory.lookup("echo").await.unwrap()));
        assert!(directory.lookup("math").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deregister_removes_instance_and_empty_service() {
        let directory = InMemoryDirectory::new();
        directory.register("kv", Instance::new("kv1", "kv1:1", 1)).await.unwrap();
        directory.register("kv", Instance::new("kv2", "kv2:1", 1)).await.unwrap();

        directory.deregister("kv", &InstanceId::new("kv1")).await.unwrap();
        assert_eq!(vec!["kv2"], ids(&directory.lookup("kv").await.unwrap()));

        directory.deregister("kv", &InstanceId::new("kv2")).await.unwrap();
        assert!(directory.services.read().get("kv").is_none());

        // Unknown instance is fine.
        directory.deregister("kv", &InstanceId::new("kv9")).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_arguments_are_rejected() {
        let directory = InMemoryDirectory::new();

        let results = vec![
            directory.register("", Instance::new("kv1", "kv1:1", 1)).await,
            directory.register("kv", Instance::new("", "kv1:1", 1)).await,
            directory.register("kv", Instance::new("kv1", "", 1)).await,
            directory.deregister("", &InstanceId::new("kv1")).await,
            directory.deregister("kv", &InstanceId::new("")).await,
        ];
        for result in results {
            assert!(matches!(result, Err(DirectoryError::InvalidArgument(_))), "{:?}", result);
        }
        assert!(matches!(
            directory.lookup("").await,
            Err(DirectoryError::InvalidArgument(_))
        ));
    }
}
