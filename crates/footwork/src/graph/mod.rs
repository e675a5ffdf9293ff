//! Footstep graph: step vertices joined by hard (must differ) and soft (weighted
//! preference) edges.
//!
//! Vertices live in an arena owned by [`StepGraph`] and are addressed by
//! [`VertexId`]. The first four vertices are anchors, one per [`Pad`], colored
//! with their own pad from the start. Adjacency is kept in ordered containers so
//! that a seeded generation run always visits neighbors in the same order.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::chart::Pad;

pub mod builder;

pub use builder::{build_graph, GraphBuilder};

/// Index of a vertex inside its [`StepGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Where a vertex came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexOrigin {
    /// One of the four pre-colored pad vertices.
    Anchor(Pad),
    /// A step first seen in this template column.
    Column(usize),
    /// A step that either foot may take.
    Wildcard,
}

/// A set of pads stored as four bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const EMPTY: ColorSet = ColorSet(0);
    pub const ALL: ColorSet = ColorSet(0b1111);

    pub fn single(pad: Pad) -> Self {
        ColorSet(1 << pad.index())
    }

    pub fn contains(self, pad: Pad) -> bool {
        self.0 & (1 << pad.index()) != 0
    }

    pub fn insert(&mut self, pad: Pad) {
        self.0 |= 1 << pad.index();
    }

    pub fn remove(&mut self, pad: Pad) {
        self.0 &= !(1 << pad.index());
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The pad if exactly one remains.
    pub fn only(self) -> Option<Pad> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Pads in column order.
    pub fn iter(self) -> impl Iterator<Item = Pad> {
        Pad::ALL.into_iter().filter(move |pad| self.contains(*pad))
    }
}

impl fmt::Debug for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Pad> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Pad>>(iter: I) -> Self {
        let mut set = ColorSet::EMPTY;
        for pad in iter {
            set.insert(pad);
        }
        set
    }
}

/// One physical footstep, possibly covering several ticks.
#[derive(Clone, Debug)]
pub struct Vertex {
    origin: VertexOrigin,
    ticks: Vec<usize>,
    color: Option<Pad>,
    hard_edges: BTreeSet<VertexId>,
    soft_edges: BTreeMap<VertexId, f64>,
}

impl Vertex {
    fn new(origin: VertexOrigin) -> Self {
        Self {
            origin,
            ticks: Vec::new(),
            color: None,
            hard_edges: BTreeSet::new(),
            soft_edges: BTreeMap::new(),
        }
    }

    pub fn origin(&self) -> VertexOrigin {
        self.origin
    }

    /// Ticks at which this step is played, in insertion (time) order.
    pub fn ticks(&self) -> &[usize] {
        &self.ticks
    }

    pub fn color(&self) -> Option<Pad> {
        self.color
    }

    pub fn hard_edges(&self) -> &BTreeSet<VertexId> {
        &self.hard_edges
    }

    pub fn soft_edges(&self) -> &BTreeMap<VertexId, f64> {
        &self.soft_edges
    }
}

/// Arena of step vertices built for one generation pass.
#[derive(Clone, Debug)]
pub struct StepGraph {
    vertices: Vec<Vertex>,
}

impl StepGraph {
    /// Creates a graph holding only the four pre-colored anchors.
    pub fn new() -> Self {
        let vertices = Pad::ALL
            .into_iter()
            .map(|pad| {
                let mut v = Vertex::new(VertexOrigin::Anchor(pad));
                v.color = Some(pad);
                v
            })
            .collect();
        Self { vertices }
    }

    pub fn anchor(pad: Pad) -> VertexId {
        VertexId(pad.index())
    }

    pub fn add_vertex(&mut self, origin: VertexOrigin) -> VertexId {
        self.vertices.push(Vertex::new(origin));
        VertexId(self.vertices.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i), v))
    }

    pub fn push_tick(&mut self, id: VertexId, tick: usize) {
        self.vertices[id.0].ticks.push(tick);
    }

    pub fn last_tick(&self, id: VertexId) -> Option<usize> {
        self.vertices[id.0].ticks.last().copied()
    }

    /// Requires `a` and `b` to end up on different pads. Replaces any soft edge
    /// between them. Connecting a vertex to itself does nothing.
    pub fn connect_hard(&mut self, a: VertexId, b: VertexId) {
        if a == b {
            return;
        }
        self.vertices[a.0].soft_edges.remove(&b);
        self.vertices[b.0].soft_edges.remove(&a);
        self.vertices[a.0].hard_edges.insert(b);
        self.vertices[b.0].hard_edges.insert(a);
    }

    /// Records a weighted preference between `a` and `b`. Refused (returns
    /// `false`) when they already share a hard edge.
    pub fn connect_soft(&mut self, a: VertexId, b: VertexId, weight: f64) -> bool {
        if a == b || self.vertices[a.0].hard_edges.contains(&b) {
            return false;
        }
        self.vertices[a.0].soft_edges.insert(b, weight);
        self.vertices[b.0].soft_edges.insert(a, weight);
        true
    }

    /// Pads not held by any hard neighbor.
    pub fn available(&self, id: VertexId) -> ColorSet {
        let mut set = ColorSet::ALL;
        for n in &self.vertices[id.0].hard_edges {
            if let Some(pad) = self.vertices[n.0].color {
                set.remove(pad);
            }
        }
        set
    }

    pub fn color(&self, id: VertexId) -> Option<Pad> {
        self.vertices[id.0].color
    }

    /// Commits a pad. Neighbors see it at once through [`StepGraph::available`].
    pub fn set_color(&mut self, id: VertexId, pad: Pad) {
        self.vertices[id.0].color = Some(pad);
    }

    pub fn clear_color(&mut self, id: VertexId) {
        self.vertices[id.0].color = None;
    }

    pub fn hard_edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.hard_edges.len()).sum::<usize>() / 2
    }

    pub fn soft_edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.soft_edges.len()).sum::<usize>() / 2
    }

    pub fn uncolored(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices()
            .filter(|(_, v)| v.color.is_none())
            .map(|(id, _)| id)
    }

    pub fn is_fully_colored(&self) -> bool {
        self.vertices.iter().all(|v| v.color.is_some())
    }

    /// Hard edges whose endpoints share a pad, each reported once.
    pub fn conflicts(&self) -> Vec<(VertexId, VertexId)> {
        let mut out = Vec::new();
        for (id, v) in self.vertices() {
            let Some(pad) = v.color else { continue };
            for &n in v.hard_edges.range(id..) {
                if self.color(n) == Some(pad) {
                    out.push((id, n));
                }
            }
        }
        out
    }
}

impl Default for StepGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_start_colored() {
        let graph = StepGraph::new();
        assert_eq!(graph.len(), 4);
        for pad in Pad::ALL {
            let id = StepGraph::anchor(pad);
            assert_eq!(graph.color(id), Some(pad));
            assert_eq!(graph.vertex(id).origin(), VertexOrigin::Anchor(pad));
        }
    }

    #[test]
    fn hard_edge_replaces_soft_edge() {
        let mut graph = StepGraph::new();
        let a = graph.add_vertex(VertexOrigin::Column(1));
        let b = graph.add_vertex(VertexOrigin::Column(2));
        assert!(graph.connect_soft(a, b, 0.25));
        assert_eq!(graph.soft_edge_count(), 1);

        graph.connect_hard(a, b);
        assert_eq!(graph.soft_edge_count(), 0);
        assert_eq!(graph.hard_edge_count(), 1);
        assert!(graph.vertex(b).hard_edges().contains(&a));

        assert!(!graph.connect_soft(b, a, 0.5));
        assert_eq!(graph.soft_edge_count(), 0);
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut graph = StepGraph::new();
        let a = graph.add_vertex(VertexOrigin::Wildcard);
        graph.connect_hard(a, a);
        assert!(!graph.connect_soft(a, a, 1.0));
        assert_eq!(graph.hard_edge_count(), 0);
    }

    #[test]
    fn availability_tracks_neighbor_colors() {
        let mut graph = StepGraph::new();
        let a = graph.add_vertex(VertexOrigin::Column(1));
        let b = graph.add_vertex(VertexOrigin::Column(2));
        graph.connect_hard(a, StepGraph::anchor(Pad::Left));
        graph.connect_hard(a, b);
        assert_eq!(
            graph.available(a),
            [Pad::Down, Pad::Up, Pad::Right].into_iter().collect()
        );

        graph.set_color(b, Pad::Up);
        assert_eq!(graph.available(a).len(), 2);
        assert!(!graph.available(a).contains(Pad::Up));

        graph.clear_color(b);
        assert!(graph.available(a).contains(Pad::Up));
    }

    #[test]
    fn conflicts_report_equal_hard_neighbors() {
        let mut graph = StepGraph::new();
        let a = graph.add_vertex(VertexOrigin::Column(0));
        graph.connect_hard(a, StepGraph::anchor(Pad::Right));
        graph.set_color(a, Pad::Right);
        assert_eq!(graph.conflicts(), vec![(StepGraph::anchor(Pad::Right), a)]);
    }

    #[test]
    fn color_set_basics() {
        let mut set = ColorSet::single(Pad::Down);
        assert_eq!(set.only(), Some(Pad::Down));
        set.insert(Pad::Right);
        assert_eq!(set.only(), None);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Pad::Down, Pad::Right]);
        set.remove(Pad::Down);
        set.remove(Pad::Right);
        assert!(set.is_empty());
        assert_eq!(ColorSet::ALL.len(), 4);
    }
}
