//! Template checks and timed row iteration.
use crate::chart::{Chart, Row, TICKS_PER_MEASURE};
use crate::error::{Error, Result};

/// Checks that every measure has [`TICKS_PER_MEASURE`] rows of the style's column count.
pub fn validate_template(template: &Chart) -> Result<()> {
    let columns = template.style.columns();
    for (m, measure) in template.measures.iter().enumerate() {
        if measure.rows.len() != TICKS_PER_MEASURE {
            return Err(Error::MalformedTemplate(format!(
                "measure {m} has {} rows, expected {TICKS_PER_MEASURE}",
                measure.rows.len()
            )));
        }
        if let Some((r, row)) = measure
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns)
        {
            return Err(Error::MalformedTemplate(format!(
                "measure {m} row {r} has {} columns, {} needs {columns}",
                row.len(),
                template.style.game_name()
            )));
        }
    }
    Ok(())
}

/// Iterates `(tick, row)` over the whole chart in time order.
pub fn timed_rows(chart: &Chart) -> impl Iterator<Item = (usize, &Row)> + '_ {
    chart
        .measures
        .iter()
        .enumerate()
        .flat_map(|(m, measure)| {
            measure
                .rows
                .iter()
                .enumerate()
                .map(move |(r, row)| (m * TICKS_PER_MEASURE + r, row))
        })
}
