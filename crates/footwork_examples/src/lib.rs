#![forbid(unsafe_code)]

mod display;

pub use display::{chart_to_string, init_tracing, parse_template};
