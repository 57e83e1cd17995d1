//! Payload descriptors passed to hooks.
//!
//! These are plain value objects: a dispatch call hands each hook a view of
//! the current payload and the hook answers with a replacement for the
//! sub-field it governs (or no opinion). Descriptors carry no identity
//! beyond the single dispatch call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Merged container environment, variable name to value.
pub type EnvMap = BTreeMap<String, String>;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_type!(
    /// Unique identifier for a task.
    TaskId
);
id_type!(
    /// Unique identifier for an executor.
    ExecutorId
);
id_type!(
    /// Unique identifier for a framework.
    FrameworkId
);
id_type!(
    /// Unique identifier for a cluster node.
    NodeId
);
id_type!(
    /// Unique identifier for a container.
    ContainerId
);

/// A single key/value label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// An ordered set of labels attached to a task or status update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub labels: Vec<Label>,
}

impl Labels {
    /// Set `key` to `value`, replacing an existing entry with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if let Some(index) = self.labels.iter().position(|l| l.key == key) {
            self.labels[index].value = Some(value.into());
        } else {
            self.labels.push(Label {
                key,
                value: Some(value.into()),
            });
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.key == key)
            .and_then(|l| l.value.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A single environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// An ordered environment variable set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub variables: Vec<EnvironmentVariable>,
}

impl Environment {
    /// Set `name` to `value`, replacing an existing variable with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(index) = self.variables.iter().position(|v| v.name == name) {
            self.variables[index].value = value.into();
        } else {
            self.variables.push(EnvironmentVariable {
                name,
                value: value.into(),
            });
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<(String, String)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(name, value)| EnvironmentVariable { name, value })
                .collect(),
        }
    }
}

/// A named scalar resource (cpus, mem, disk, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub scalar: f64,
}

impl Resource {
    pub fn new(name: impl Into<String>, scalar: f64) -> Self {
        Self {
            name: name.into(),
            scalar,
        }
    }
}

/// The resources a node advertises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub resources: Vec<Resource>,
}

impl Resources {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.scalar)
    }
}

/// A named text attribute a node advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The attributes a node advertises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub attributes: Vec<Attribute>,
}

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// The command an executor runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub environment: Environment,
}

/// A task as submitted for launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub task_id: TaskId,
    pub name: String,
    pub node_id: NodeId,
    #[serde(default)]
    pub labels: Labels,
}

impl TaskInfo {
    pub fn new(task_id: TaskId, name: impl Into<String>, node_id: NodeId) -> Self {
        Self {
            task_id,
            name: name.into(),
            node_id,
            labels: Labels::default(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }
}

/// An executor responsible for running one or more tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorInfo {
    pub executor_id: ExecutorId,
    pub framework_id: FrameworkId,
    #[serde(default)]
    pub command: CommandInfo,
}

impl ExecutorInfo {
    pub fn new(executor_id: ExecutorId, framework_id: FrameworkId) -> Self {
        Self {
            executor_id,
            framework_id,
            command: CommandInfo::default(),
        }
    }
}

/// A framework registered with the control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkInfo {
    pub framework_id: FrameworkId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl FrameworkInfo {
    pub fn new(framework_id: FrameworkId, name: impl Into<String>) -> Self {
        Self {
            framework_id,
            name: name.into(),
            user: None,
        }
    }
}

/// A cluster node and what it advertises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node_id: NodeId,
    pub hostname: String,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub attributes: Attributes,
}

impl NodeInfo {
    pub fn new(node_id: NodeId, hostname: impl Into<String>) -> Self {
        Self {
            node_id,
            hostname: hostname.into(),
            resources: Resources::default(),
            attributes: Attributes::default(),
        }
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A host path mounted into a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub host_path: PathBuf,
    pub container_path: PathBuf,
}

/// Container settings for a launch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
}

/// Runtime state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Staging,
    Starting,
    Running,
    Finished,
    Failed,
    Killed,
    Lost,
}

/// Container-level details attached to a status update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<ContainerId>,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
}

/// A task status update.
///
/// `labels` and `container_status` are the fields the status decorator may
/// overwrite, each independently of the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task_id: TaskId,
    pub state: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_status: Option<ContainerStatus>,
}

impl TaskStatus {
    pub fn new(task_id: TaskId, state: TaskState) -> Self {
        Self {
            task_id,
            state,
            message: None,
            labels: None,
            container_status: None,
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_container_status(mut self, container_status: ContainerStatus) -> Self {
        self.container_status = Some(container_status);
        self
    }
}
