use footwork::prelude::*;
use footwork_examples::{chart_to_string, init_tracing, parse_template};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Column 7 holds wildcards: steps either foot may take.
    let template = parse_template(
        ChartStyle::Double,
        &[
            &["00010000", "00000001", "00010000", "00000001"],
            &[
                "00100000", "00000001", "00100000", "00000001", "00010000", "00000001",
                "00010000", "00000001",
            ],
        ],
    )?
    .with_difficulty("Medium");

    let config = GenerateConfig::new().with_wildcard_soft_weight(0.5);
    let seed = 7;
    info!(
        "Generating from a {} template with seed {seed}.",
        template.style.game_name()
    );
    let mut rng = StdRng::seed_from_u64(seed);

    // Collect search progress alongside the usual log output.
    let mut sink = VecSink::filtered(&[
        GenerationEventKind::GraphBuilt,
        GenerationEventKind::Backtracked,
        GenerationEventKind::Finished,
    ]);
    let chart = generate_with_events(&template, &config, &mut rng, &mut sink)?;

    for event in sink.as_slice() {
        println!("{event:?}");
    }
    print!("{}", chart_to_string(&chart));

    Ok(())
}
