//! Footstep graph builder.
//!
//! Scans template rows in time order and decides, note by note, which physical
//! step plays it. Feet alternate by default; a repeated column is a double-step,
//! the crossover column sends the moving foot to the opposite side, wildcards
//! get a fresh vertex of their own, and every other note joins a short-lived
//! series of steps on the same column.
//!
//! Hard edges mark pairs that cannot share a pad. Soft edges mark a weighted
//! preference that the colorer may or may not honor.
use rand::RngCore;
use tracing::debug;

use crate::chart::template::timed_rows;
use crate::chart::{Cell, Chart, Pad};
use crate::graph::{StepGraph, VertexId, VertexOrigin};

/// Series vertices are reused when their last tick is at most this many ticks back (half a measure).
pub const DEFAULT_SERIES_WINDOW: usize = 96;
/// Weight of the soft edge between a wildcard and a non-series previous step of the same foot.
pub const DEFAULT_WILDCARD_SOFT_WEIGHT: f64 = 0.25;
pub const DEFAULT_CROSSOVER_COLUMN: usize = 0;
/// Column whose notes are wildcards in doubles-width templates.
pub const DEFAULT_WILDCARD_COLUMN: usize = 7;

/// Footwork inference rules used while building the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildOptions {
    pub series_window: usize,
    pub wildcard_soft_weight: f64,
    pub crossover_column: Option<usize>,
    pub wildcard_column: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            series_window: DEFAULT_SERIES_WINDOW,
            wildcard_soft_weight: DEFAULT_WILDCARD_SOFT_WEIGHT,
            crossover_column: Some(DEFAULT_CROSSOVER_COLUMN),
            wildcard_column: Some(DEFAULT_WILDCARD_COLUMN),
        }
    }
}

/// The foot about to step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub fn other(self) -> Foot {
        match self {
            Foot::Left => Foot::Right,
            Foot::Right => Foot::Left,
        }
    }

    /// Default pad of this foot.
    pub fn side(self) -> Pad {
        match self {
            Foot::Left => Pad::Left,
            Foot::Right => Pad::Right,
        }
    }

    pub fn random(rng: &mut dyn RngCore) -> Foot {
        if rng.next_u32() & 1 == 0 {
            Foot::Left
        } else {
            Foot::Right
        }
    }

    fn index(self) -> usize {
        match self {
            Foot::Left => 0,
            Foot::Right => 1,
        }
    }
}

/// Row-scanning state for one template.
pub struct GraphBuilder {
    options: BuildOptions,
    graph: StepGraph,
    foot: Foot,
    history: [Vec<VertexId>; 2],
    prev: Option<usize>,
    series: Vec<Option<VertexId>>,
    /// Vertices already stepped on in the row being consumed.
    row: Vec<VertexId>,
    notes: usize,
}

impl GraphBuilder {
    pub fn new(options: BuildOptions, columns: usize, starting_foot: Foot) -> Self {
        Self {
            options,
            graph: StepGraph::new(),
            foot: starting_foot,
            history: [Vec::new(), Vec::new()],
            prev: None,
            series: vec![None; columns],
            row: Vec::new(),
            notes: 0,
        }
    }

    /// Number of notes consumed so far.
    pub fn note_count(&self) -> usize {
        self.notes
    }

    /// Consumes one row. Rows must arrive in increasing tick order.
    pub fn push_row(&mut self, tick: usize, row: &[Cell]) {
        if row.len() > self.series.len() {
            self.series.resize(row.len(), None);
        }

        self.row.clear();
        for (column, cell) in row.iter().enumerate() {
            if cell.is_mine() {
                self.series[column] = None;
            }
        }

        for (column, cell) in row.iter().enumerate() {
            if !cell.is_note() {
                continue;
            }
            let wildcard =
                *cell == Cell::Wildcard || self.options.wildcard_column == Some(column);
            self.step(tick, column, wildcard);
        }
    }

    pub fn finish(self) -> StepGraph {
        self.graph
    }

    fn step(&mut self, tick: usize, note: usize, wildcard: bool) {
        let crossover = self.options.crossover_column;

        let vertex = if self.prev.is_none() {
            let v = StepGraph::anchor(self.foot.side());
            if !wildcard {
                self.series[note] = Some(v);
            }
            v
        } else if let Some(v) = self.double_step(note, wildcard) {
            v
        } else if let Some(v) = self.crossover_step(note, wildcard, crossover) {
            self.bind_to_other_foot(v);
            v
        } else if let Some(v) = self.continuing_after_crossover() {
            self.bind_to_other_foot(v);
            v
        } else if wildcard {
            self.wildcard_step()
        } else {
            self.series_step(tick, note)
        };

        // Simultaneous notes land on different pads.
        for &other in &self.row {
            self.graph.connect_hard(vertex, other);
        }
        self.row.push(vertex);

        self.graph.push_tick(vertex, tick);
        self.history[self.foot.index()].push(vertex);
        self.prev = Some(note);
        self.foot = self.foot.other();
        self.notes += 1;
    }

    /// The foot that just moved repeats its position.
    fn double_step(&mut self, note: usize, wildcard: bool) -> Option<VertexId> {
        if wildcard || self.prev != Some(note) {
            return None;
        }
        let foot = self.foot.other();
        let v = self
            .last(foot)
            .unwrap_or_else(|| StepGraph::anchor(foot.side()));
        if self.in_row(v) {
            return None;
        }
        self.foot = foot;
        Some(v)
    }

    fn crossover_step(
        &self,
        note: usize,
        wildcard: bool,
        crossover: Option<usize>,
    ) -> Option<VertexId> {
        if wildcard || crossover != Some(note) {
            return None;
        }
        let v = StepGraph::anchor(self.foot.other().side());
        (!self.in_row(v)).then_some(v)
    }

    fn in_row(&self, v: VertexId) -> bool {
        self.row.contains(&v)
    }

    fn last(&self, foot: Foot) -> Option<VertexId> {
        self.history[foot.index()].last().copied()
    }

    fn is_series_vertex(&self, v: VertexId) -> bool {
        self.series.iter().any(|s| *s == Some(v))
    }

    fn continuing_after_crossover(&self) -> Option<VertexId> {
        match self.options.crossover_column {
            Some(column) if self.prev == Some(column) => {
                self.last(self.foot).filter(|v| !self.in_row(*v))
            }
            _ => None,
        }
    }

    fn bind_to_other_foot(&mut self, v: VertexId) {
        if let Some(other) = self.last(self.foot.other()) {
            self.graph.connect_hard(v, other);
        }
    }

    fn wildcard_step(&mut self) -> VertexId {
        let v = self.graph.add_vertex(VertexOrigin::Wildcard);
        self.graph
            .connect_hard(v, StepGraph::anchor(self.foot.other().side()));
        self.bind_to_other_foot(v);

        if let Some(own) = self.last(self.foot) {
            if self.is_series_vertex(own) {
                self.graph.connect_hard(v, own);
            } else {
                self.graph
                    .connect_soft(v, own, self.options.wildcard_soft_weight);
            }
        }
        v
    }

    fn series_step(&mut self, tick: usize, note: usize) -> VertexId {
        let window = self.options.series_window;
        let reusable = self.series[note].filter(|&s| {
            !self.in_row(s)
                && self
                    .graph
                    .last_tick(s)
                    .is_some_and(|last| last + window >= tick)
        });
        let v = match reusable {
            Some(v) => v,
            None => {
                let v = self.graph.add_vertex(VertexOrigin::Column(note));
                self.series[note] = Some(v);
                v
            }
        };

        self.graph
            .connect_hard(v, StepGraph::anchor(self.foot.other().side()));
        self.bind_to_other_foot(v);
        if let Some(own) = self.last(self.foot) {
            if own != v {
                self.graph.connect_hard(v, own);
            }
        }
        v
    }
}

/// Builds the footstep graph for a whole template.
pub fn build_graph(template: &Chart, options: &BuildOptions, starting_foot: Foot) -> StepGraph {
    let mut builder = GraphBuilder::new(options.clone(), template.style.columns(), starting_foot);
    for (tick, row) in timed_rows(template) {
        builder.push_row(tick, row);
    }
    debug!(
        "Built step graph: {} notes, {} vertices, {} hard edges, {} soft edges.",
        builder.note_count(),
        builder.graph.len(),
        builder.graph.hard_edge_count(),
        builder.graph.soft_edge_count()
    );
    builder.finish()
}
