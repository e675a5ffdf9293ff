//! Constraint-propagation coloring of a footstep graph onto the four pads.
//!
//! Coloring runs in two phases:
//! - [`propagate_forced`]: vertices with a single remaining pad take it, until a
//!   full pass commits nothing.
//! - a weighted backtracking search over the rest. Vertices are visited in
//!   order of [`entropy`] using a [`PriorityMap`] worklist, and decisions sit on
//!   an explicit stack so that undoing one is a pop rather than an unwind.
//!
//! Pads are drawn through a [`ColorChooser`]; soft edges bias the draw toward
//! (or away from) the pads their neighbors already hold.
use tracing::debug;

use crate::chart::Pad;
use crate::error::{Error, Result};
use crate::generate::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::graph::{ColorSet, StepGraph, VertexId};
use crate::queue::PriorityMap;

pub mod chooser;

pub use chooser::{pick_weighted, ColorChooser, FnChooser, RngChooser};

/// Counters describing one coloring run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColoringStats {
    /// Vertices colored by forced propagation.
    pub forced: usize,
    /// Pads committed by the search, including retries.
    pub decisions: usize,
    /// Vertices that ran out of pads and were undone.
    pub backtracks: usize,
    /// Search loop iterations.
    pub steps: usize,
}

/// Search priority: few open pads first, then many hard constraints.
///
/// `4^|available| - |hard edges|`; the exponential term keeps "fewer choices"
/// dominant over "more constraints".
pub fn entropy(graph: &StepGraph, id: VertexId) -> i64 {
    let open = graph.available(id).len() as u32;
    4i64.pow(open) - graph.vertex(id).hard_edges().len() as i64
}

/// Commits every uncolored vertex whose available set shrank to one pad,
/// repeating full passes until nothing changes. Returns the number committed.
pub fn propagate_forced(graph: &mut StepGraph) -> Result<usize> {
    let mut forced = 0;
    loop {
        let mut changed = false;
        for id in graph.ids() {
            if graph.color(id).is_some() {
                continue;
            }
            let available = graph.available(id);
            if available.is_empty() {
                return Err(Error::Unsatisfiable { vertex: id.index() });
            }
            if let Some(pad) = available.only() {
                graph.set_color(id, pad);
                forced += 1;
                changed = true;
            }
        }
        if !changed {
            return Ok(forced);
        }
    }
}

/// Colors every vertex of `graph` or fails without a valid assignment.
pub fn color_graph(
    graph: &mut StepGraph,
    chooser: &mut dyn ColorChooser,
    max_steps: usize,
) -> Result<ColoringStats> {
    color_graph_with_events(graph, chooser, max_steps, &mut ())
}

pub fn color_graph_with_events(
    graph: &mut StepGraph,
    chooser: &mut dyn ColorChooser,
    max_steps: usize,
    sink: &mut dyn EventSink,
) -> Result<ColoringStats> {
    let forced = propagate_forced(graph)?;
    let remaining = graph.uncolored().count();
    debug!("Forced {} vertices; {} left for search.", forced, remaining);
    if sink.wants(GenerationEventKind::Propagated) {
        sink.send(GenerationEvent::Propagated { forced, remaining });
    }

    let mut stats = search(graph, chooser, max_steps, sink)?;
    stats.forced = forced;
    Ok(stats)
}

/// One decision on the search stack. `entropy` is the key the vertex was
/// popped with; it goes back into the worklist unchanged when the frame runs
/// out of pads.
struct Frame {
    vertex: VertexId,
    entropy: i64,
    options: ColorSet,
}

impl Frame {
    fn open(graph: &StepGraph, vertex: VertexId, entropy: i64) -> Self {
        Self {
            vertex,
            entropy,
            options: graph.available(vertex),
        }
    }
}

fn search(
    graph: &mut StepGraph,
    chooser: &mut dyn ColorChooser,
    max_steps: usize,
    sink: &mut dyn EventSink,
) -> Result<ColoringStats> {
    let mut stats = ColoringStats::default();
    let mut queue: PriorityMap<VertexId, i64> = graph
        .uncolored()
        .map(|id| (id, entropy(graph, id)))
        .collect();

    let Ok((first, first_entropy)) = queue.pop_min() else {
        return Ok(stats);
    };
    let mut stack = vec![Frame::open(graph, first, first_entropy)];

    while let Some(mut frame) = stack.pop() {
        stats.steps += 1;
        if stats.steps > max_steps {
            return Err(Error::SearchExhausted { steps: max_steps });
        }

        if frame.options.is_empty() {
            graph.clear_color(frame.vertex);
            requeue_neighbors(graph, &mut queue, frame.vertex);
            debug_assert_eq!(frame.entropy, entropy(graph, frame.vertex));
            queue.set(frame.vertex, frame.entropy);
            stats.backtracks += 1;
            if sink.wants(GenerationEventKind::Backtracked) {
                sink.send(GenerationEvent::Backtracked {
                    vertex: frame.vertex.index(),
                    depth: stack.len(),
                });
            }
            continue;
        }

        let weights = color_weights(graph, frame.vertex, frame.options);
        let pad = chooser
            .choose(&weights)
            .filter(|pad| frame.options.contains(*pad))
            .or_else(|| frame.options.iter().next())
            .ok_or(Error::Unsatisfiable {
                vertex: frame.vertex.index(),
            })?;

        graph.set_color(frame.vertex, pad);
        stats.decisions += 1;
        requeue_neighbors(graph, &mut queue, frame.vertex);
        frame.options.remove(pad);
        stack.push(frame);

        match queue.pop_min() {
            Ok((next, next_entropy)) => stack.push(Frame::open(graph, next, next_entropy)),
            Err(_) => break,
        }
    }

    if let Ok((vertex, _)) = queue.peek_min() {
        return Err(Error::Unsatisfiable {
            vertex: vertex.index(),
        });
    }
    if let Some(vertex) = graph.uncolored().next() {
        return Err(Error::Unsatisfiable {
            vertex: vertex.index(),
        });
    }
    debug!(
        "Search finished: {} decisions, {} backtracks, {} steps.",
        stats.decisions, stats.backtracks, stats.steps
    );
    Ok(stats)
}

/// Refreshes the entropy of every uncolored hard neighbor of `id`.
fn requeue_neighbors(graph: &StepGraph, queue: &mut PriorityMap<VertexId, i64>, id: VertexId) {
    for &n in graph.vertex(id).hard_edges() {
        if graph.color(n).is_none() {
            queue.set(n, entropy(graph, n));
        }
    }
}

/// Weight of each open pad: the product of the soft edge weights of neighbors
/// already holding that pad, or 1 when none do.
fn color_weights(graph: &StepGraph, id: VertexId, options: ColorSet) -> Vec<(Pad, f64)> {
    let soft = graph.vertex(id).soft_edges();
    options
        .iter()
        .map(|pad| {
            let weight = soft
                .iter()
                .filter(|(n, _)| graph.color(**n) == Some(pad))
                .map(|(_, w)| *w)
                .product::<f64>();
            (pad, weight)
        })
        .collect()
}
