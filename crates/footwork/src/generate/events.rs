//! Event types and sinks for observing generation runs.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect, or
//! forward events while a chart is generated via
//! [`crate::generate::generate_with_events`] or [`crate::generate::regenerate_with_events`].
use crate::coloring::ColoringStats;
use crate::generate::GenerationStats;
use crate::graph::builder::Foot;

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// Emitted when generation starts for a template.
    Started {
        /// Credit of the template chart.
        credit: String,
        /// Number of measures in the template.
        measures: usize,
        /// Foot that takes the first note.
        starting_foot: Foot,
    },

    /// Emitted once the footstep graph is complete.
    GraphBuilt {
        /// Notes consumed from the template.
        notes: usize,
        /// Vertices including the four anchors.
        vertices: usize,
        hard_edges: usize,
        soft_edges: usize,
    },

    /// Emitted after forced propagation.
    Propagated {
        /// Vertices colored because a single pad remained.
        forced: usize,
        /// Vertices left for the search.
        remaining: usize,
    },

    /// Emitted when the search undoes a decision.
    Backtracked {
        /// Index of the vertex that ran out of pads.
        vertex: usize,
        /// Decision stack depth after the undo.
        depth: usize,
    },

    /// Emitted when coloring has finished.
    Colored {
        stats: ColoringStats,
    },

    /// Emitted when the output chart has been assembled.
    Finished {
        stats: GenerationStats,
    },

    /// Non-fatal warning generated during generation.
    Warning {
        /// Context string (e.g. chart credit).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`GenerationEvent`], used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    Started,
    GraphBuilt,
    Propagated,
    Backtracked,
    Colored,
    Finished,
    Warning,
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::Started { .. } => GenerationEventKind::Started,
            GenerationEvent::GraphBuilt { .. } => GenerationEventKind::GraphBuilt,
            GenerationEvent::Propagated { .. } => GenerationEventKind::Propagated,
            GenerationEvent::Backtracked { .. } => GenerationEventKind::Backtracked,
            GenerationEvent::Colored { .. } => GenerationEventKind::Colored,
            GenerationEvent::Finished { .. } => GenerationEventKind::Finished,
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether events of `kind` should be built at all.
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    only: Option<Vec<GenerationEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only the listed kinds.
    pub fn filtered(kinds: &[GenerationEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GenerationEvent) {
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(event.kind()))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> GenerationEvent {
        GenerationEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(GenerationEventKind::Warning));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send_many([warning("a"), warning("b")]);
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_vec_sink_drops_other_kinds() {
        let mut sink = VecSink::filtered(&[GenerationEventKind::Propagated]);
        assert!(!sink.wants(GenerationEventKind::Warning));
        sink.send(warning("a"));
        sink.send(GenerationEvent::Propagated {
            forced: 1,
            remaining: 2,
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].kind(), GenerationEventKind::Propagated);
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::filtered(&[GenerationEventKind::Finished]),
            VecSink::new(),
        ]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 3);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 0);
        assert_eq!(multi.sinks[2].len(), 1);
        assert!(matches!(
            multi.sinks[2].as_slice()[0],
            GenerationEvent::Warning { .. }
        ));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }
}
