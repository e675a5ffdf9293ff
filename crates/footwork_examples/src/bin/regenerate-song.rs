use footwork::prelude::*;
use footwork_examples::{chart_to_string, init_tracing, parse_template};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Hand-written charts are kept as they are.
    let mut handmade = parse_template(ChartStyle::Single, &[&["1000", "0000", "0001", "0000"]])?
        .with_difficulty("Beginner");
    handmade.credit = "someone".into();

    let templates = [
        parse_template(ChartStyle::Single, &[&["0100", "0010", "0100", "0010"]])?
            .with_difficulty("Easy"),
        parse_template(
            ChartStyle::Single,
            &[&["0100", "0010", "0110", "0010", "0100", "0001", "0100", "0010"]],
        )?
        .with_difficulty("Medium"),
    ];

    let mut song = vec![handmade];
    song.extend(templates);

    // Unseeded: every run produces a new set of generated charts.
    let mut rng = rand::rng();
    let song = regenerate(&song, &GenerateConfig::default(), &mut rng)?;
    info!("Song now holds {} charts.", song.len());

    for chart in &song {
        print!("{}", chart_to_string(chart));
        println!();
    }

    Ok(())
}
