use std::collections::HashMap;
use std::fmt;

/// InstanceId is the unique, non-empty identity a server process registers under.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        InstanceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instance describes one running server of a service, as it is registered in the directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instance {
    pub id: InstanceId,
    /// host:port that clients and peers dial.
    pub addr: String,
    /// Only meaningful to weighted pickers. Values <= 0 count as 1.
    pub weight: i64,
    pub meta: HashMap<String, String>,
}

impl Instance {
    pub fn new(id: impl Into<String>, addr: impl Into<String>, weight: i64) -> Self {
        Instance {
            id: InstanceId::new(id),
            addr: addr.into(),
            weight,
            meta: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn effective_weight(&self) -> u64 {
        if self.weight <= 0 {
            1
        } else {
            self.weight as u64
        }
    }
}
