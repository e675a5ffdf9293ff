use footwork::prelude::*;
use footwork_examples::{chart_to_string, init_tracing, parse_template};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // An alternating stream with a jump, a double-step and a mine.
    let template = parse_template(
        ChartStyle::Single,
        &[
            &["0100", "0010", "0100", "0010"],
            &["0110", "0000", "0100", "0010", "0100", "0010", "0100", "0100"],
            &["0010", "0100", "0010", "0M00"],
            &["0100", "0010", "0100", "0011"],
        ],
    )?
    .with_difficulty("Hard")
    .with_meter("8");

    let config = GenerateConfig::new();
    let seed = 2025;
    info!("Generating '{}' with seed {seed}.", template.difficulty);
    let mut rng = StdRng::seed_from_u64(seed);

    let chart = generate_from_template(&template, &config, &mut rng)?;
    print!("{}", chart_to_string(&chart));

    Ok(())
}
