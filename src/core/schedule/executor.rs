//=========================================================================
// Schedule Executor
//=========================================================================
//
// Runs a compiled schedule against the world, one wave at a time.
//
// Single-task waves execute inline on the calling thread. Wider waves
// fan out to scoped worker threads that pull task indices from a
// crossbeam channel and send their command buffers back. Either way,
// buffers are applied to the world in task-id order after the wave, so
// structural changes are deterministic regardless of which worker
// finished first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::unbounded;
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::ecs::{CommandBuffer, World};

use super::graph::Schedule;
use super::task::TickContext;

//=========================================================================

impl Schedule {
    /// Executes every wave once, applying deferred commands between
    /// waves.
    pub fn run(&self, world: &mut World, ctx: &TickContext) {
        for (wave_index, wave) in self.waves.iter().enumerate() {
            trace!("running wave {} ({} task(s))", wave_index, wave.len());

            let mut buffers = if wave.len() == 1 {
                self.run_inline(wave, world, ctx)
            } else {
                self.run_fanned_out(wave, world, ctx)
            };

            buffers.sort_by_key(|(index, _)| *index);
            for (_, mut buffer) in buffers {
                buffer.apply(world);
            }
        }
    }

    fn run_inline(
        &self,
        wave: &[usize],
        world: &World,
        ctx: &TickContext,
    ) -> Vec<(usize, CommandBuffer)> {
        wave.iter()
            .map(|&index| {
                let mut commands = CommandBuffer::new();
                self.nodes[index].task.run(world, ctx, &mut commands);
                (index, commands)
            })
            .collect()
    }

    fn run_fanned_out(
        &self,
        wave: &[usize],
        world: &World,
        ctx: &TickContext,
    ) -> Vec<(usize, CommandBuffer)> {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(wave.len());

        let (job_tx, job_rx) = unbounded::<usize>();
        let (result_tx, result_rx) = unbounded::<(usize, CommandBuffer)>();

        for &index in wave {
            // Receiver outlives all sends; unbounded send cannot fail here.
            let _ = job_tx.send(index);
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    while let Ok(index) = job_rx.recv() {
                        let mut commands = CommandBuffer::new();
                        self.nodes[index].task.run(world, ctx, &mut commands);
                        let _ = result_tx.send((index, commands));
                    }
                });
            }
        });
        drop(result_tx);

        result_rx.iter().collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::config::EngineConfig;
    use crate::core::schedule::TaskGraph;

    #[derive(Debug, PartialEq)]
    struct Counter(u64);

    fn ctx() -> TickContext {
        TickContext { delta_time: 0.016, frame: 0, elapsed: 0.0 }
    }

    #[test]
    fn single_task_wave_runs_and_applies_commands() {
        let mut world = World::new(&EngineConfig::default());
        let mut graph = TaskGraph::new();
        graph.add_task("spawn", |_: &World, _: &TickContext, commands: &mut CommandBuffer| {
            commands.spawn_with(Counter(1));
        });

        let schedule = graph.compile().unwrap();
        schedule.run(&mut world, &ctx());

        assert_eq!(world.len(), 1);
        assert_eq!(world.count::<Counter>(), 1);
    }

    #[test]
    fn parallel_wave_runs_every_task() {
        let mut world = World::new(&EngineConfig::default());
        let ran = Arc::new(AtomicUsize::new(0));

        let mut graph = TaskGraph::new();
        for name in ["a", "b", "c", "d"] {
            let ran = Arc::clone(&ran);
            graph.add_task(name, move |_: &World, _: &TickContext, _: &mut CommandBuffer| {
                ran.fetch_add(1, Ordering::SeqCst);
            });
        }

        let schedule = graph.compile().unwrap();
        assert_eq!(schedule.wave_count(), 1);
        schedule.run(&mut world, &ctx());

        assert_eq!(ran.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn later_wave_sees_commands_from_earlier_wave() {
        let mut world = World::new(&EngineConfig::default());
        let observed = Arc::new(AtomicUsize::new(0));

        let mut graph = TaskGraph::new();
        let producer =
            graph.add_task("producer", |_: &World, _: &TickContext, commands: &mut CommandBuffer| {
                commands.spawn_with(Counter(5));
            });
        let observed_clone = Arc::clone(&observed);
        let consumer = graph.add_task(
            "consumer",
            move |world: &World, _: &TickContext, _: &mut CommandBuffer| {
                observed_clone.store(world.count::<Counter>(), Ordering::SeqCst);
            },
        );
        graph.add_dependency(producer, consumer).unwrap();

        let schedule = graph.compile().unwrap();
        schedule.run(&mut world, &ctx());

        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn command_application_order_follows_task_ids() {
        // Both tasks insert on the same entity in one wave; the higher
        // task id must win regardless of worker timing.
        let mut world = World::new(&EngineConfig::default());
        let entity = world.spawn().unwrap();

        let mut graph = TaskGraph::new();
        graph.add_task("first", move |_: &World, _: &TickContext, commands: &mut CommandBuffer| {
            commands.insert(entity, Counter(1));
        });
        graph.add_task("second", move |_: &World, _: &TickContext, commands: &mut CommandBuffer| {
            commands.insert(entity, Counter(2));
        });

        let schedule = graph.compile().unwrap();
        for _ in 0..16 {
            schedule.run(&mut world, &ctx());
            assert_eq!(world.get::<Counter>(entity), Some(&Counter(2)));
        }
    }

    #[test]
    fn tick_context_reaches_tasks() {
        let mut world = World::new(&EngineConfig::default());
        let seen_frame = Arc::new(AtomicUsize::new(usize::MAX));
        let seen = Arc::clone(&seen_frame);

        let mut graph = TaskGraph::new();
        graph.add_task("probe", move |_: &World, ctx: &TickContext, _: &mut CommandBuffer| {
            seen.store(ctx.frame as usize, Ordering::SeqCst);
        });

        let schedule = graph.compile().unwrap();
        let ctx = TickContext { delta_time: 0.5, frame: 41, elapsed: 20.5 };
        schedule.run(&mut world, &ctx);

        assert_eq!(seen_frame.load(Ordering::SeqCst), 41);
    }
}
