#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use footwork::prelude::{Cell, Chart, ChartStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// An eighth-note stream alternating columns 1 and 2, with a jump on every
/// other downbeat.
pub fn stream_template(measures: usize) -> Chart {
    let mut chart = Chart::empty(ChartStyle::Single, "template", measures);
    for m in 0..measures {
        for i in 0..8 {
            let tick = m * 192 + i * 24;
            let _ = chart.set_cell(tick, 1 + i % 2, Cell::Tap);
            if i == 0 && m % 2 == 0 {
                let _ = chart.set_cell(tick, 3, Cell::Tap);
            }
        }
    }
    chart
}

/// Random sixteenth-note taps on a doubles template, column 7 included.
pub fn random_doubles_template(measures: usize, density: f32, seed: u64) -> Chart {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chart = Chart::empty(ChartStyle::Double, "template", measures);
    for m in 0..measures {
        for i in 0..16 {
            if rng.random::<f32>() < density {
                let column = 1 + (rng.random::<u32>() % 7) as usize;
                let _ = chart.set_cell(m * 192 + i * 12, column, Cell::Tap);
            }
        }
    }
    chart
}
