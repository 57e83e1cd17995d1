//! Hook capability interface.
//!
//! Extensions implement [`Hook`] to observe and mutate lifecycle events.
//! Every method is independently optional: the default bodies answer
//! "no opinion" (decorators) or success (notifications), so an extension
//! implements only the events it cares about.

use async_trait::async_trait;
use std::path::Path;

use crate::descriptor::{
    Attributes, CommandInfo, ContainerId, ContainerInfo, EnvMap, Environment, ExecutorInfo,
    FrameworkId, FrameworkInfo, Labels, NodeInfo, Resources, TaskInfo, TaskStatus,
};
use crate::error::HookError;

/// Outcome of a decorator hook call.
///
/// `Ok(None)` means the hook has no opinion and the payload stays as-is;
/// `Ok(Some(v))` replaces the sub-field the hook governs. Errors are
/// reported per-invocation and do not modify the payload.
pub type Decoration<T> = Result<Option<T>, HookError>;

/// The lifecycle events an extension may implement.
///
/// Decorator methods run sequentially in registry order, each seeing the
/// payload as modified by the hooks before it. Notification methods are
/// fire-and-forget. `container_environment` is the one asynchronous event:
/// all loaded hooks run concurrently and their results are merged.
#[allow(unused_variables)]
#[async_trait]
pub trait Hook: Send + Sync + 'static {
    /// Decorate the labels of a task the scheduler is about to launch.
    fn task_launch_labels(
        &self,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        node: &NodeInfo,
    ) -> Decoration<Labels> {
        Ok(None)
    }

    /// A node was lost by the control plane.
    fn node_lost(&self, node: &NodeInfo) -> Result<(), HookError> {
        Ok(())
    }

    /// Decorate the labels of a task an executor is about to run.
    fn task_run_labels(
        &self,
        task: &TaskInfo,
        executor: &ExecutorInfo,
        framework: &FrameworkInfo,
        node: &NodeInfo,
    ) -> Decoration<Labels> {
        Ok(None)
    }

    /// Decorate the environment an executor is launched with.
    fn executor_environment(&self, executor: &ExecutorInfo) -> Decoration<Environment> {
        Ok(None)
    }

    /// Decorate the environment a container is launched with.
    ///
    /// Runs concurrently with the other loaded hooks; the dispatcher merges
    /// the returned variable sets in registry order.
    async fn container_environment(
        &self,
        task: Option<&TaskInfo>,
        executor: &ExecutorInfo,
        container_name: &str,
        sandbox_directory: &Path,
        mapped_directory: &Path,
        env: Option<&EnvMap>,
    ) -> Decoration<Environment> {
        Ok(None)
    }

    /// A container is about to be launched.
    #[allow(clippy::too_many_arguments)]
    fn pre_launch_container(
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
    ) -> Result<(), HookError> {
        Ok(())
    }

    /// A container's artifacts finished fetching into its sandbox.
    fn post_fetch(&self, container_id: &ContainerId, directory: &Path) -> Result<(), HookError> {
        Ok(())
    }

    /// An executor was removed from a node.
    fn executor_removed(
        &self,
        framework: &FrameworkInfo,
        executor: &ExecutorInfo,
    ) -> Result<(), HookError> {
        Ok(())
    }

    /// Decorate a task status update.
    ///
    /// Only the `labels` and `container_status` fields of the returned
    /// status are applied, each independently: a hook that sets one leaves
    /// the other untouched.
    fn task_status(
        &self,
        framework_id: &FrameworkId,
        status: &TaskStatus,
    ) -> Decoration<TaskStatus> {
        Ok(None)
    }

    /// Decorate the resources a node advertises.
    fn node_resources(&self, node: &NodeInfo) -> Decoration<Resources> {
        Ok(None)
    }

    /// Decorate the attributes a node advertises.
    fn node_attributes(&self, node: &NodeInfo) -> Decoration<Attributes> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ExecutorId, NodeId, TaskId};

    // An extension that implements nothing gets no-opinion defaults for
    // every event.
    struct Silent;

    impl Hook for Silent {}

    #[tokio::test]
    async fn test_defaults_are_no_opinion() {
        let hook = Silent;
        let node = NodeInfo::new(NodeId::new("node-1"), "host-1");
        let framework = FrameworkInfo::new(FrameworkId::new("fw-1"), "fw");
        let task = TaskInfo::new(TaskId::new("task-1"), "task", NodeId::new("node-1"));
        let executor = ExecutorInfo::new(ExecutorId::new("exec-1"), FrameworkId::new("fw-1"));

        assert!(hook
            .task_launch_labels(&task, &framework, &node)
            .unwrap()
            .is_none());
        assert!(hook.node_resources(&node).unwrap().is_none());
        assert!(hook.node_lost(&node).is_ok());
        assert!(hook
            .container_environment(
                Some(&task),
                &executor,
                "container-1",
                Path::new("/sandbox"),
                Path::new("/mnt/sandbox"),
                None,
            )
            .await
            .unwrap()
            .is_none());
    }
}
