use footwork::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Builds a template from measures written as simfile rows, one string per row.
pub fn parse_template(style: ChartStyle, measures: &[&[&str]]) -> Result<Chart> {
    let measures = measures
        .iter()
        .map(|rows| {
            let rows = rows
                .iter()
                .map(|r| row_from_symbols(r))
                .collect::<Result<Vec<_>>>()?;
            Measure::from_quantized(rows)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Chart::new(style, "template").with_measures(measures))
}

/// Renders the rows that hold at least one non-empty cell, one line each,
/// prefixed with measure and beat position.
pub fn chart_to_string(chart: &Chart) -> String {
    let mut out = format!(
        "{} / {} / {} {}\n",
        chart.style.game_name(),
        chart.credit,
        chart.difficulty,
        chart.meter
    );
    for (tick, row) in timed_rows(chart) {
        if row.iter().all(|c| *c == Cell::Empty) {
            continue;
        }
        let measure = tick / TICKS_PER_MEASURE;
        let beat = (tick % TICKS_PER_MEASURE) as f32 / (TICKS_PER_MEASURE / 4) as f32;
        let cells: String = row
            .iter()
            .enumerate()
            .map(|(column, cell)| match cell {
                Cell::Tap if chart.style == ChartStyle::Single => {
                    Pad::from_index(column).map_or('?', Pad::arrow)
                }
                other => other.symbol().unwrap_or('*'),
            })
            .collect();
        out.push_str(&format!("{measure:>3}:{beat:<5.2} {cells}\n"));
    }
    out
}
