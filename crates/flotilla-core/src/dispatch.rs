//! Dispatch strategies over the loaded hook extensions.
//!
//! Three invocation disciplines coexist here and must not be confused:
//!
//! - **Sequential decoration**: hooks run in registry order under the
//!   registry lock, each seeing the payload as edited by the hooks before
//!   it. A failing hook is logged and skipped; the chain continues.
//! - **Fire-and-forget notification**: hooks run in registry order against
//!   a snapshot, outside the lock. Failures are purely diagnostic.
//! - **Concurrent fan-out/fan-in**: every hook starts before any is awaited;
//!   completed results merge in registry order (last wins). If any hook
//!   fails, the whole call fails with no partial result.

use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use flotilla_protocols::descriptor::{
    Attributes, CommandInfo, ContainerId, ContainerInfo, EnvMap, Environment, ExecutorInfo,
    FrameworkId, FrameworkInfo, Labels, NodeInfo, Resources, TaskInfo, TaskStatus,
};
use flotilla_protocols::error::DispatchError;
use flotilla_protocols::hook::Hook;

use crate::registry::HookRegistry;

/// Invokes every loaded extension for a firing lifecycle event and combines
/// their results.
///
/// The dispatcher only borrows hook instances during a call; ownership
/// stays with the [`HookRegistry`].
pub struct HookDispatcher {
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher reads.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Decorate the labels of a task the scheduler is about to launch.
    ///
    /// Returns the final labels after all hooks have run.
    pub fn task_launch_labels(
        &self,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        node: &NodeInfo,
    ) -> Labels {
        let entries = self.registry.locked();

        // Work on a mutable copy so each hook sees the labels set by the
        // hooks before it.
        let mut task = task.clone();

        for entry in entries.iter() {
            match entry.hook.task_launch_labels(&task, framework, node) {
                Ok(Some(labels)) => task.labels = labels,
                Ok(None) => {}
                Err(e) => warn!(
                    "Task launch label decorator failed for extension '{}': {}",
                    entry.name, e
                ),
            }
        }

        task.labels
    }

    /// Notify hooks that a node was lost.
    pub fn node_lost(&self, node: &NodeInfo) {
        for entry in self.registry.snapshot() {
            if let Err(e) = entry.hook.node_lost(node) {
                warn!("Node-lost hook failed for extension '{}': {}", entry.name, e);
            }
        }
    }

    /// Decorate the labels of a task an executor is about to run.
    pub fn task_run_labels(
        &self,
        task: &TaskInfo,
        executor: &ExecutorInfo,
        framework: &FrameworkInfo,
        node: &NodeInfo,
    ) -> Labels {
        let entries = self.registry.locked();
        let mut task = task.clone();

        for entry in entries.iter() {
            match entry.hook.task_run_labels(&task, executor, framework, node) {
                Ok(Some(labels)) => task.labels = labels,
                Ok(None) => {}
                Err(e) => warn!(
                    "Task run label decorator failed for extension '{}': {}",
                    entry.name, e
                ),
            }
        }

        task.labels
    }

    /// Decorate the environment an executor is launched with.
    ///
    /// Returns the final environment after all hooks have run.
    pub fn executor_environment(&self, mut executor: ExecutorInfo) -> Environment {
        let entries = self.registry.locked();

        for entry in entries.iter() {
            match entry.hook.executor_environment(&executor) {
                Ok(Some(environment)) => executor.command.environment = environment,
                Ok(None) => {}
                Err(e) => warn!(
                    "Executor environment decorator failed for extension '{}': {}",
                    entry.name, e
                ),
            }
        }

        executor.command.environment
    }

    /// Decorate the environment a container is launched with.
    ///
    /// Every loaded hook starts concurrently; once all have completed, the
    /// returned variable sets merge in registry order, so on duplicate
    /// variable names the extension loaded last wins. If any hook failed,
    /// the whole call fails and no partial environment is returned.
    pub async fn container_environment(
        &self,
        task: Option<&TaskInfo>,
        executor: &ExecutorInfo,
        container_name: &str,
        sandbox_directory: &Path,
        mapped_directory: &Path,
        env: Option<&EnvMap>,
    ) -> Result<EnvMap, DispatchError> {
        let entries = self.registry.snapshot();

        let futures: Vec<_> = entries
            .iter()
            .map(|entry| {
                entry.hook.container_environment(
                    task,
                    executor,
                    container_name,
                    sandbox_directory,
                    mapped_directory,
                    env,
                )
            })
            .collect();
        let results = join_all(futures).await;

        let mut merged = EnvMap::new();
        for (entry, result) in entries.iter().zip(results) {
            match result {
                Ok(Some(environment)) => {
                    for variable in environment.variables {
                        merged.insert(variable.name, variable.value);
                    }
                }
                Ok(None) => {}
                Err(source) => {
                    return Err(DispatchError::ContainerEnvironment {
                        name: entry.name.clone(),
                        source,
                    });
                }
            }
        }

        Ok(merged)
    }

    /// Notify hooks that a container is about to be launched.
    #[allow(clippy::too_many_arguments)]
    pub fn pre_launch_container(
        &self,
        container: &ContainerInfo,
        command: &CommandInfo,
        task: Option<&TaskInfo>,
        executor: &ExecutorInfo,
        container_name: &str,
        sandbox_directory: &Path,
        mapped_directory: &Path,
        resources: Option<&Resources>,
        env: Option<&EnvMap>,
    ) {
        for entry in self.registry.snapshot() {
            if let Err(e) = entry.hook.pre_launch_container(
                container,
                command,
                task,
                executor,
                container_name,
                sandbox_directory,
                mapped_directory,
                resources,
                env,
            ) {
                warn!(
                    "Pre-launch container hook failed for extension '{}': {}",
                    entry.name, e
                );
            }
        }
    }

    /// Notify hooks that a container's artifacts finished fetching.
    pub fn post_fetch(&self, container_id: &ContainerId, directory: &Path) {
        for entry in self.registry.snapshot() {
            if let Err(e) = entry.hook.post_fetch(container_id, directory) {
                warn!(
                    "Post-fetch hook failed for extension '{}': {}",
                    entry.name, e
                );
            }
        }
    }

    /// Notify hooks that an executor was removed.
    pub fn executor_removed(&self, framework: &FrameworkInfo, executor: &ExecutorInfo) {
        for entry in self.registry.snapshot() {
            if let Err(e) = entry.hook.executor_removed(framework, executor) {
                warn!(
                    "Executor-removed hook failed for extension '{}': {}",
                    entry.name, e
                );
            }
        }
    }

    /// Decorate a task status update.
    ///
    /// Labels and container status apply independently: a hook that sets
    /// only one of them leaves the other as the previous hooks produced it.
    pub fn task_status(&self, framework_id: &FrameworkId, mut status: TaskStatus) -> TaskStatus {
        let entries = self.registry.locked();

        for entry in entries.iter() {
            match entry.hook.task_status(framework_id, &status) {
                Ok(Some(decorated)) => {
                    if let Some(labels) = decorated.labels {
                        status.labels = Some(labels);
                    }
                    if let Some(container_status) = decorated.container_status {
                        status.container_status = Some(container_status);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(
                    "Task status decorator failed for extension '{}': {}",
                    entry.name, e
                ),
            }
        }

        status
    }

    /// Decorate the resources a node advertises.
    pub fn node_resources(&self, node: &NodeInfo) -> Resources {
        let entries = self.registry.locked();
        let mut node = node.clone();

        for entry in entries.iter() {
            match entry.hook.node_resources(&node) {
                Ok(Some(resources)) => node.resources = resources,
                Ok(None) => {}
                Err(e) => warn!(
                    "Node resources decorator failed for extension '{}': {}",
                    entry.name, e
                ),
            }
        }

        node.resources
    }

    /// Decorate the attributes a node advertises.
    pub fn node_attributes(&self, node: &NodeInfo) -> Attributes {
        let entries = self.registry.locked();
        let mut node = node.clone();

        for entry in entries.iter() {
            match entry.hook.node_attributes(&node) {
                Ok(Some(attributes)) => node.attributes = attributes,
                Ok(None) => {}
                Err(e) => warn!(
                    "Node attributes decorator failed for extension '{}': {}",
                    entry.name, e
                ),
            }
        }

        node.attributes
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
