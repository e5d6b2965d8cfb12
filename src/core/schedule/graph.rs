//=========================================================================
// Task Graph
//=========================================================================
//
// Explicit task graph with dependency edges. Callers add tasks, wire
// `before -> after` edges, and compile the graph into a `Schedule`:
// a sequence of waves where every task's dependencies finished in an
// earlier wave. Tasks inside one wave have no path between them and
// may run concurrently.
//
// Compilation is Kahn's algorithm with level grouping. Within a wave,
// tasks keep insertion order, so schedules are deterministic for a
// given registration order.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::error::ScheduleError;

use super::task::Task;

//=== TaskId ==============================================================

/// Identifier of a task inside one [`TaskGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(super) usize);

//=== TaskGraph ===========================================================

pub(super) struct Node {
    pub name: String,
    pub task: Box<dyn Task>,
    pub dependencies: Vec<usize>,
}

/// Mutable builder for a frame schedule.
///
/// # Examples
///
/// ```
/// use dfc_engine::core::schedule::TaskGraph;
/// use dfc_engine::core::ecs::{CommandBuffer, World};
/// use dfc_engine::core::schedule::TickContext;
///
/// let mut graph = TaskGraph::new();
/// let input = graph.add_task("input", |_: &World, _: &TickContext, _: &mut CommandBuffer| {});
/// let physics = graph.add_task("physics", |_: &World, _: &TickContext, _: &mut CommandBuffer| {});
/// graph.add_dependency(input, physics).unwrap();
///
/// let schedule = graph.compile().unwrap();
/// assert_eq!(schedule.wave_count(), 2);
/// ```
#[derive(Default)]
pub struct TaskGraph {
    nodes: Vec<Node>,
}

impl TaskGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a task and returns its id for dependency wiring.
    pub fn add_task<T: Task + 'static>(&mut self, name: &str, task: T) -> TaskId {
        let id = TaskId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            task: Box::new(task),
            dependencies: Vec::new(),
        });
        id
    }

    /// Declares that `before` must finish before `after` starts.
    ///
    /// Unknown ids and self-edges are rejected. Duplicate edges are
    /// accepted and deduplicated.
    pub fn add_dependency(&mut self, before: TaskId, after: TaskId) -> Result<(), ScheduleError> {
        if before.0 >= self.nodes.len() {
            return Err(ScheduleError::UnknownTask(before.0));
        }
        if after.0 >= self.nodes.len() {
            return Err(ScheduleError::UnknownTask(after.0));
        }
        if before == after {
            return Err(ScheduleError::SelfDependency(self.nodes[before.0].name.clone()));
        }

        let dependencies = &mut self.nodes[after.0].dependencies;
        if !dependencies.contains(&before.0) {
            dependencies.push(before.0);
        }
        Ok(())
    }

    /// Number of tasks added so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no tasks were added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Compiles the graph into executable waves.
    ///
    /// Fails with [`ScheduleError::Cycle`] when the dependency edges
    /// admit no execution order.
    pub fn compile(self) -> Result<Schedule, ScheduleError> {
        let count = self.nodes.len();

        // dependents[i] = tasks that wait on i.
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut indegree: Vec<usize> = vec![0; count];
        for (index, node) in self.nodes.iter().enumerate() {
            indegree[index] = node.dependencies.len();
            for &dep in &node.dependencies {
                dependents[dep].push(index);
            }
        }

        // Kahn's algorithm, peeled one level at a time so level N holds
        // exactly the tasks whose longest dependency chain has length N.
        let mut waves: Vec<Vec<usize>> = Vec::new();
        let mut ready: Vec<usize> =
            (0..count).filter(|&index| indegree[index] == 0).collect();
        let mut scheduled = 0;

        while !ready.is_empty() {
            let wave = std::mem::take(&mut ready);
            for &index in &wave {
                scheduled += 1;
                for &dependent in &dependents[index] {
                    indegree[dependent] -= 1;
                    if indegree[dependent] == 0 {
                        ready.push(dependent);
                    }
                }
            }
            waves.push(wave);
        }

        if scheduled != count {
            // Any task still carrying indegree sits on (or behind) a cycle.
            let culprit = (0..count)
                .find(|&index| indegree[index] > 0)
                .map(|index| self.nodes[index].name.clone())
                .unwrap_or_default();
            return Err(ScheduleError::Cycle(culprit));
        }

        debug!("schedule compiled: {} task(s) in {} wave(s)", count, waves.len());
        Ok(Schedule { nodes: self.nodes, waves })
    }
}

//=== Schedule ============================================================

/// Compiled, immutable execution plan for one frame.
///
/// Produced by [`TaskGraph::compile`]; executed by
/// [`Schedule::run`](crate::core::schedule::Schedule::run) once per tick.
pub struct Schedule {
    pub(super) nodes: Vec<Node>,
    pub(super) waves: Vec<Vec<usize>>,
}

impl Schedule {
    /// Number of sequential waves.
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Total number of tasks.
    pub fn task_count(&self) -> usize {
        self.nodes.len()
    }

    /// Task names wave by wave, for diagnostics.
    pub fn describe(&self) -> Vec<Vec<&str>> {
        self.waves
            .iter()
            .map(|wave| wave.iter().map(|&index| self.nodes[index].name.as_str()).collect())
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ecs::{CommandBuffer, World};
    use crate::core::schedule::TickContext;

    fn noop() -> impl Task {
        |_: &World, _: &TickContext, _: &mut CommandBuffer| {}
    }

    #[test]
    fn empty_graph_compiles_to_empty_schedule() {
        let schedule = TaskGraph::new().compile().unwrap();
        assert_eq!(schedule.wave_count(), 0);
        assert_eq!(schedule.task_count(), 0);
    }

    #[test]
    fn independent_tasks_share_one_wave() {
        let mut graph = TaskGraph::new();
        graph.add_task("a", noop());
        graph.add_task("b", noop());
        graph.add_task("c", noop());

        let schedule = graph.compile().unwrap();
        assert_eq!(schedule.wave_count(), 1);
        assert_eq!(schedule.describe(), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn chains_become_sequential_waves() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task("a", noop());
        let b = graph.add_task("b", noop());
        let c = graph.add_task("c", noop());
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(b, c).unwrap();

        let schedule = graph.compile().unwrap();
        assert_eq!(schedule.describe(), vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn diamond_dependencies_level_correctly() {
        // a -> b, a -> c, b -> d, c -> d
        let mut graph = TaskGraph::new();
        let a = graph.add_task("a", noop());
        let b = graph.add_task("b", noop());
        let c = graph.add_task("c", noop());
        let d = graph.add_task("d", noop());
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(a, c).unwrap();
        graph.add_dependency(b, d).unwrap();
        graph.add_dependency(c, d).unwrap();

        let schedule = graph.compile().unwrap();
        assert_eq!(schedule.describe(), vec![vec!["a"], vec!["b", "c"], vec!["d"]]);
    }

    #[test]
    fn cycle_is_rejected_with_a_culprit_name() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task("a", noop());
        let b = graph.add_task("b", noop());
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(b, a).unwrap();

        match graph.compile() {
            Err(ScheduleError::Cycle(name)) => assert!(name == "a" || name == "b"),
            other => panic!("expected cycle error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn self_dependency_is_rejected() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task("a", noop());
        assert_eq!(
            graph.add_dependency(a, a),
            Err(ScheduleError::SelfDependency("a".to_string()))
        );
    }

    #[test]
    fn unknown_task_id_is_rejected() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task("a", noop());
        let ghost = TaskId(99);
        assert_eq!(graph.add_dependency(a, ghost), Err(ScheduleError::UnknownTask(99)));
        assert_eq!(graph.add_dependency(ghost, a), Err(ScheduleError::UnknownTask(99)));
    }

    #[test]
    fn duplicate_edges_are_deduplicated() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task("a", noop());
        let b = graph.add_task("b", noop());
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(a, b).unwrap();

        let schedule = graph.compile().unwrap();
        assert_eq!(schedule.wave_count(), 2);
    }
}
