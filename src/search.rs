use std::collections::{hash_map::Entry, HashMap};

use tracing::debug;

use crate::{vault::graph::KeyGraph, Error};

mod heap;
mod state;

pub use heap::MinHeap;
pub use state::{RobotSet, StateCodec};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub popped_n: usize,
    pub stale_n: usize,
    pub pushed_n: usize,
    pub state_n: usize,
}

/// Minimum total steps for `robot_n` robots, starting at the entrances of the graph, to collect
/// every key. `None` if some key can never be reached.
pub fn min_collect_steps(graph: &KeyGraph, robot_n: usize) -> Result<Option<usize>, Error> {
    min_collect_steps_with_stats(graph, robot_n).map(|(steps_n, _)| steps_n)
}

pub fn min_collect_steps_with_stats(
    graph: &KeyGraph,
    robot_n: usize,
) -> Result<(Option<usize>, SearchStats), Error> {
    let codec = StateCodec::new(robot_n, graph.vertex_n())?;
    if graph.entrance_n() != robot_n {
        return Err(Error::EntranceCountMismatch {
            expected: robot_n,
            found: graph.entrance_n(),
        });
    }

    let all_keys = graph.all_keys();
    let init_robots = RobotSet::new(&(0..robot_n).collect::<Vec<_>>());
    let init_id = codec.state_id(&init_robots, 0);
    let mut best_steps_n = HashMap::from([(init_id, 0)]);
    let mut states = MinHeap::new();
    states.push(0, init_id);
    let mut stats = SearchStats::default();

    // Dijkstra's search over (robot positions, collected keys).
    let mut min_steps_n = None;
    while let Some((cur_steps_n, cur_id)) = states.pop() {
        stats.popped_n += 1;
        if best_steps_n
            .get(&cur_id)
            .is_some_and(|steps_n| *steps_n < cur_steps_n)
        {
            stats.stale_n += 1;
            continue;
        }

        let (robots, keys) = codec.split_state_id(cur_id);
        if keys == all_keys {
            min_steps_n = Some(cur_steps_n);
            break;
        }

        for (slot, v) in robots.iter().enumerate() {
            for edge in graph.edges_from(v) {
                if keys & edge.key != 0 || edge.doors & !keys != 0 {
                    continue;
                }

                let next_id = codec.state_id(&robots.moved(slot, edge.to), keys | edge.key);
                let next_steps_n = cur_steps_n + edge.steps_n;
                let improved = match best_steps_n.entry(next_id) {
                    Entry::Vacant(entry) => {
                        entry.insert(next_steps_n);
                        true
                    }
                    Entry::Occupied(mut entry) if next_steps_n < *entry.get() => {
                        entry.insert(next_steps_n);
                        true
                    }
                    Entry::Occupied(_) => false,
                };
                if improved {
                    stats.pushed_n += 1;
                    states.push(next_steps_n, next_id);
                }
            }
        }
    }

    stats.state_n = best_steps_n.len();
    debug!(
        ?min_steps_n,
        popped_n = stats.popped_n,
        stale_n = stats.stale_n,
        pushed_n = stats.pushed_n,
        state_n = stats.state_n,
        "key collecting search finished"
    );

    Ok((min_steps_n, stats))
}
