//! Regenerating every template chart of a song at once.
use rand::RngCore;
use tracing::info;

use crate::chart::Chart;
use crate::error::Result;
use crate::generate::events::EventSink;
use crate::generate::{generate_with_events, GenerateConfig};

/// Replaces the generated charts of a song.
///
/// Charts credited `config.output_credit` are dropped, every other chart is
/// kept in order, and one freshly generated chart is appended per chart
/// credited `config.template_credit`. Any failure aborts the whole batch.
pub fn regenerate(
    charts: &[Chart],
    config: &GenerateConfig,
    rng: &mut impl RngCore,
) -> Result<Vec<Chart>> {
    regenerate_with_events(charts, config, rng, &mut ())
}

pub fn regenerate_with_events(
    charts: &[Chart],
    config: &GenerateConfig,
    rng: &mut impl RngCore,
    sink: &mut dyn EventSink,
) -> Result<Vec<Chart>> {
    config.validate()?;

    let mut out: Vec<Chart> = charts
        .iter()
        .filter(|c| c.credit != config.output_credit)
        .cloned()
        .collect();
    let kept = out.len();

    for template in charts.iter().filter(|c| c.credit == config.template_credit) {
        out.push(generate_with_events(template, config, rng, sink)?);
    }

    info!(
        "Regenerated {} charts ({} dropped, {} kept).",
        out.len() - kept,
        charts.len() - kept,
        kept
    );
    Ok(out)
}
