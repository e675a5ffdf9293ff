//! Chart generation: template in, playable single-pad chart out.
//!
//! A run validates the template, builds its footstep graph, colors the graph
//! onto the four pads and projects the colors back onto a tick grid. The
//! foot that takes the first note is drawn from the caller's RNG; pad choices
//! come from the same RNG unless a [`ColorChooser`] is injected.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chart::template::validate_template;
use crate::chart::{Cell, Chart, ChartStyle, Measure, Pad, TICKS_PER_MEASURE};
use crate::coloring::{
    color_graph_with_events, pick_weighted, ColorChooser, ColoringStats, FnChooser,
};
use crate::error::{Error, Result};
use crate::graph::builder::{
    BuildOptions, Foot, DEFAULT_CROSSOVER_COLUMN, DEFAULT_SERIES_WINDOW,
    DEFAULT_WILDCARD_COLUMN, DEFAULT_WILDCARD_SOFT_WEIGHT,
};
use crate::graph::{build_graph, StepGraph};

pub mod batch;
pub mod events;

pub use batch::{regenerate, regenerate_with_events};
use events::{EventSink, GenerationEvent, GenerationEventKind};

pub const DEFAULT_MAX_SEARCH_STEPS: usize = 1_000_000;
pub const DEFAULT_OUTPUT_CREDIT: &str = "generated";
pub const DEFAULT_TEMPLATE_CREDIT: &str = "template";

/// Configuration for generating charts from templates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    /// A column's series vertex is reused while its last tick is within this many ticks.
    pub series_window: usize,
    /// Soft edge weight between a wildcard and a non-series previous step.
    pub wildcard_soft_weight: f64,
    /// Template column whose notes cross the moving foot over.
    pub crossover_column: Option<usize>,
    /// Template column whose notes are treated as wildcards.
    pub wildcard_column: Option<usize>,
    /// Upper bound on coloring search iterations.
    pub max_search_steps: usize,
    /// Credit written on generated charts.
    pub output_credit: String,
    /// Credit that marks a chart as a template in [`regenerate`].
    pub template_credit: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            series_window: DEFAULT_SERIES_WINDOW,
            wildcard_soft_weight: DEFAULT_WILDCARD_SOFT_WEIGHT,
            crossover_column: Some(DEFAULT_CROSSOVER_COLUMN),
            wildcard_column: Some(DEFAULT_WILDCARD_COLUMN),
            max_search_steps: DEFAULT_MAX_SEARCH_STEPS,
            output_credit: DEFAULT_OUTPUT_CREDIT.into(),
            template_credit: DEFAULT_TEMPLATE_CREDIT.into(),
        }
    }
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the series reuse window in ticks.
    pub fn with_series_window(mut self, series_window: usize) -> Self {
        self.series_window = series_window;
        self
    }

    pub fn with_wildcard_soft_weight(mut self, weight: f64) -> Self {
        self.wildcard_soft_weight = weight;
        self
    }

    /// Sets the crossover column, or disables crossovers with `None`.
    pub fn with_crossover_column(mut self, column: Option<usize>) -> Self {
        self.crossover_column = column;
        self
    }

    /// Sets the wildcard column, or disables column wildcards with `None`.
    pub fn with_wildcard_column(mut self, column: Option<usize>) -> Self {
        self.wildcard_column = column;
        self
    }

    pub fn with_max_search_steps(mut self, steps: usize) -> Self {
        self.max_search_steps = steps;
        self
    }

    pub fn with_output_credit(mut self, credit: impl Into<String>) -> Self {
        self.output_credit = credit.into();
        self
    }

    pub fn with_template_credit(mut self, credit: impl Into<String>) -> Self {
        self.template_credit = credit.into();
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.wildcard_soft_weight.is_finite() && self.wildcard_soft_weight > 0.0) {
            return Err(Error::InvalidConfig(
                "wildcard_soft_weight must be finite and > 0".into(),
            ));
        }
        if self.max_search_steps == 0 {
            return Err(Error::InvalidConfig("max_search_steps must be > 0".into()));
        }
        if self.output_credit == self.template_credit {
            return Err(Error::InvalidConfig(
                "output_credit and template_credit must differ".into(),
            ));
        }
        Ok(())
    }

    /// Graph builder rules derived from this configuration.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            series_window: self.series_window,
            wildcard_soft_weight: self.wildcard_soft_weight,
            crossover_column: self.crossover_column,
            wildcard_column: self.wildcard_column,
        }
    }
}

/// Summary of one generated chart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationStats {
    /// Notes read from the template.
    pub notes: usize,
    /// Graph vertices including the four anchors.
    pub vertices: usize,
    pub hard_edges: usize,
    pub soft_edges: usize,
    pub coloring: ColoringStats,
}

/// Generates a single-pad chart from `template`, drawing every random choice from `rng`.
pub fn generate_from_template(
    template: &Chart,
    config: &GenerateConfig,
    rng: &mut impl RngCore,
) -> Result<Chart> {
    generate_with_events(template, config, rng, &mut ())
}

/// Like [`generate_from_template`], reporting progress to `sink`.
pub fn generate_with_events(
    template: &Chart,
    config: &GenerateConfig,
    rng: &mut impl RngCore,
    sink: &mut dyn EventSink,
) -> Result<Chart> {
    let rng: &mut dyn RngCore = rng;
    let starting_foot = Foot::random(rng);
    let mut chooser = FnChooser::new(|options: &[(Pad, f64)]| pick_weighted(options, rng));
    generate_inner(template, config, starting_foot, &mut chooser, sink)
}

/// Generates with pad choices delegated to `chooser`; `rng` only picks the starting foot.
pub fn generate_with_chooser(
    template: &Chart,
    config: &GenerateConfig,
    rng: &mut impl RngCore,
    chooser: &mut dyn ColorChooser,
) -> Result<Chart> {
    let starting_foot = Foot::random(rng);
    generate_inner(template, config, starting_foot, chooser, &mut ())
}

fn generate_inner(
    template: &Chart,
    config: &GenerateConfig,
    starting_foot: Foot,
    chooser: &mut dyn ColorChooser,
    sink: &mut dyn EventSink,
) -> Result<Chart> {
    config.validate()?;
    validate_template(template)?;

    if sink.wants(GenerationEventKind::Started) {
        sink.send(GenerationEvent::Started {
            credit: template.credit.clone(),
            measures: template.measures.len(),
            starting_foot,
        });
    }

    let mut graph = build_graph(template, &config.build_options(), starting_foot);
    let mut stats = GenerationStats {
        notes: graph.vertices().map(|(_, v)| v.ticks().len()).sum(),
        vertices: graph.len(),
        hard_edges: graph.hard_edge_count(),
        soft_edges: graph.soft_edge_count(),
        coloring: ColoringStats::default(),
    };
    if stats.notes == 0 {
        warn!(
            "Template '{}' has no notes; output will be empty.",
            template.credit
        );
        if sink.wants(GenerationEventKind::Warning) {
            sink.send(GenerationEvent::Warning {
                context: template.credit.clone(),
                message: "template has no notes".into(),
            });
        }
    }
    if sink.wants(GenerationEventKind::GraphBuilt) {
        sink.send(GenerationEvent::GraphBuilt {
            notes: stats.notes,
            vertices: stats.vertices,
            hard_edges: stats.hard_edges,
            soft_edges: stats.soft_edges,
        });
    }

    stats.coloring = color_graph_with_events(&mut graph, chooser, config.max_search_steps, sink)?;
    if sink.wants(GenerationEventKind::Colored) {
        sink.send(GenerationEvent::Colored {
            stats: stats.coloring,
        });
    }

    let measures = project_graph(&graph, template.measures.len())?;
    let chart = Chart::new(ChartStyle::Single, config.output_credit.clone())
        .with_difficulty(template.difficulty.clone())
        .with_meter(template.meter.clone())
        .with_groove(template.groove.clone())
        .with_measures(measures);

    info!(
        "Generated chart from '{}' ({}): {} notes, {} vertices, {} hard / {} soft edges, {} decisions, {} backtracks.",
        template.credit,
        template.difficulty,
        stats.notes,
        stats.vertices,
        stats.hard_edges,
        stats.soft_edges,
        stats.coloring.decisions,
        stats.coloring.backtracks
    );
    if sink.wants(GenerationEventKind::Finished) {
        sink.send(GenerationEvent::Finished { stats });
    }

    Ok(chart)
}

/// Writes a tap at `(tick, color)` for every tick of every vertex into
/// `measure_count` empty four-column measures.
pub fn project_graph(graph: &StepGraph, measure_count: usize) -> Result<Vec<Measure>> {
    let columns = ChartStyle::Single.columns();
    let mut measures = vec![Measure::empty(columns); measure_count];
    for (id, vertex) in graph.vertices() {
        if vertex.ticks().is_empty() {
            continue;
        }
        let pad = vertex.color().ok_or(Error::Unsatisfiable { vertex: id.index() })?;
        for &tick in vertex.ticks() {
            let row = measures
                .get_mut(tick / TICKS_PER_MEASURE)
                .and_then(|m| m.rows.get_mut(tick % TICKS_PER_MEASURE))
                .ok_or_else(|| {
                    Error::MalformedTemplate(format!(
                        "tick {tick} lies beyond {measure_count} measures"
                    ))
                })?;
            row[pad.index()] = Cell::Tap;
        }
    }
    Ok(measures)
}
