#![forbid(unsafe_code)]
//! footwork: Step-chart generation from rhythm templates via footstep graphs.
//!
//! Modules:
//! - chart: notes, measures, charts and template validation on a 192-tick grid
//! - queue: keyed min-priority queue with updatable priorities
//! - graph: footstep graph and the rules that build it from a template
//! - coloring: forced propagation and weighted backtracking onto four pads
//! - generate: configuration, the end-to-end driver, batch regeneration, events
pub mod chart;
pub mod coloring;
pub mod error;
pub mod generate;
pub mod graph;
pub mod queue;

/// Convenient re-exports for common types. Import with `use footwork::prelude::*;`.
pub mod prelude {
    pub use crate::chart::template::{timed_rows, validate_template};
    pub use crate::chart::{
        row_from_symbols, Cell, Chart, ChartStyle, Measure, Pad, Row, TICKS_PER_MEASURE,
    };
    pub use crate::coloring::{
        color_graph, color_graph_with_events, entropy, pick_weighted, propagate_forced,
        ColorChooser, ColoringStats, FnChooser, RngChooser,
    };
    pub use crate::error::{Error, Result};
    pub use crate::generate::events::{
        EventSink, FnSink, GenerationEvent, GenerationEventKind, MultiSink, VecSink,
    };
    pub use crate::generate::{
        generate_from_template, generate_with_chooser, generate_with_events, project_graph,
        regenerate, regenerate_with_events, GenerateConfig, GenerationStats,
    };
    pub use crate::graph::builder::{BuildOptions, Foot};
    pub use crate::graph::{
        build_graph, ColorSet, GraphBuilder, StepGraph, Vertex, VertexId, VertexOrigin,
    };
    pub use crate::queue::PriorityMap;
}
