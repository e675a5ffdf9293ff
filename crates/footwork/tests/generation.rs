use std::collections::{BTreeMap, BTreeSet};

use footwork::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn measure(rows: &[&str]) -> Measure {
    let rows = rows
        .iter()
        .map(|r| row_from_symbols(r))
        .collect::<Result<Vec<_>>>()
        .unwrap();
    Measure::from_quantized(rows).unwrap()
}

fn single_template() -> Chart {
    Chart::new(ChartStyle::Single, "template")
        .with_difficulty("Challenge")
        .with_meter("12")
        .with_measures(vec![
            measure(&["0100", "0010", "0100", "0010"]),
            measure(&[
                "0110", "0000", "0100", "0010", "0100", "0010", "0100", "0100",
            ]),
            measure(&["0010", "0100", "0010", "0M00"]),
            measure(&["0100", "0010", "0100", "0011"]),
        ])
}

fn doubles_template() -> Chart {
    Chart::new(ChartStyle::Double, "template").with_measures(vec![
        measure(&["00010000", "00000001", "00010000", "00000001"]),
        measure(&[
            "00100000", "00000001", "00100000", "00000001", "00010000", "00000001",
            "00010000", "00000001",
        ]),
    ])
}

/// Number of notes at each tick that holds any.
fn notes_per_tick(chart: &Chart) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for (tick, _) in chart.note_positions() {
        *counts.entry(tick).or_insert(0) += 1;
    }
    counts
}

#[test]
fn generated_charts_keep_rhythm_across_seeds() {
    let template = single_template();
    let config = GenerateConfig::default();

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let chart = generate_from_template(&template, &config, &mut rng).unwrap();
        assert_eq!(chart.style, ChartStyle::Single);
        assert_eq!(chart.measures.len(), template.measures.len());
        assert!(chart.measures.iter().all(|m| m.rows.len() == TICKS_PER_MEASURE));
        assert!(chart.measures.iter().all(|m| m.columns() == 4));
        assert_eq!(notes_per_tick(&chart), notes_per_tick(&template));
        assert_eq!(chart.difficulty, "Challenge");
        assert_eq!(chart.meter, "12");
    }
}

#[test]
fn colored_graphs_respect_every_hard_edge() {
    let options = GenerateConfig::default().build_options();

    for (template, foot) in [
        (single_template(), Foot::Left),
        (single_template(), Foot::Right),
        (doubles_template(), Foot::Left),
        (doubles_template(), Foot::Right),
    ] {
        for seed in 0..8 {
            let mut graph = build_graph(&template, &options, foot);
            let mut chooser = RngChooser::new(StdRng::seed_from_u64(seed));
            color_graph(&mut graph, &mut chooser, 100_000).unwrap();

            assert!(graph.is_fully_colored());
            for (id, vertex) in graph.vertices() {
                for &n in vertex.hard_edges() {
                    assert_ne!(graph.color(id), graph.color(n), "{id} and {n} share a pad");
                }
            }
        }
    }
}

#[test]
fn simultaneous_notes_land_on_different_pads() {
    let template = Chart::new(ChartStyle::Single, "template")
        .with_measures(vec![measure(&["0110", "0000", "0000", "0000"])]);

    for seed in 0..16 {
        let chart = generate_from_template(
            &template,
            &GenerateConfig::default(),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        let notes = chart.note_positions();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].0, 0);
        assert_eq!(notes[1].0, 0);
        assert_ne!(notes[0].1, notes[1].1);
    }
}

#[test]
fn rows_after_crossover_keep_every_note() {
    let mut template = Chart::empty(ChartStyle::Single, "template", 1);
    for (tick, column) in [(0, 2), (0, 3), (24, 2), (48, 0), (72, 0), (72, 1)] {
        template.set_cell(tick, column, Cell::Tap).unwrap();
    }

    for seed in 0..16 {
        let chart = generate_from_template(
            &template,
            &GenerateConfig::default(),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        assert_eq!(notes_per_tick(&chart), notes_per_tick(&template));
        assert_eq!(notes_per_tick(&chart)[&72], 2);
    }
}

#[test]
fn doubles_template_with_wildcards_generates_single_chart() {
    let template = doubles_template();
    let options = GenerateConfig::default().build_options();
    let graph = build_graph(&template, &options, Foot::Left);
    let wildcards = graph
        .vertices()
        .filter(|(_, v)| v.origin() == VertexOrigin::Wildcard)
        .count();
    assert_eq!(wildcards, 6);
    assert!(graph.soft_edge_count() > 0);

    let chart = generate_from_template(
        &template,
        &GenerateConfig::default(),
        &mut StdRng::seed_from_u64(77),
    )
    .unwrap();
    assert_eq!(chart.style, ChartStyle::Single);
    assert_eq!(notes_per_tick(&chart), notes_per_tick(&template));
}

#[test]
fn same_seed_is_reproducible_and_seeds_differ() {
    let template = single_template();
    let config = GenerateConfig::default();
    let run = |seed| {
        generate_from_template(&template, &config, &mut StdRng::seed_from_u64(seed)).unwrap()
    };

    assert_eq!(run(123), run(123));
    let distinct: BTreeSet<_> = (0..16).map(|s| run(s).note_positions()).collect();
    assert!(distinct.len() > 1);
}

#[test]
fn malformed_templates_are_rejected_before_generation() {
    assert!(matches!(
        row_from_symbols("01X0"),
        Err(Error::MalformedTemplate(_))
    ));
    assert!(matches!(
        Measure::from_quantized(vec![vec![Cell::Empty; 4]; 5]),
        Err(Error::MalformedTemplate(_))
    ));

    let narrow = Chart::new(ChartStyle::Double, "template")
        .with_measures(vec![measure(&["0100", "0010", "0100", "0010"])]);
    let err = generate_from_template(
        &narrow,
        &GenerateConfig::default(),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedTemplate(_)));
}

#[test]
fn regenerate_replaces_previous_output() {
    let first = regenerate(
        &[single_template()],
        &GenerateConfig::default(),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    assert_eq!(first.len(), 2);

    let second = regenerate(&first, &GenerateConfig::default(), &mut StdRng::seed_from_u64(2))
        .unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].credit, "template");
    assert_eq!(second[1].credit, "generated");
}

#[test]
fn event_sink_sees_whole_run() {
    let mut multi = MultiSink::with_sinks(vec![
        VecSink::new(),
        VecSink::filtered(&[GenerationEventKind::Backtracked]),
    ]);
    generate_with_events(
        &single_template(),
        &GenerateConfig::default(),
        &mut StdRng::seed_from_u64(4),
        &mut multi,
    )
    .unwrap();

    let mut count = 0;
    let mut sink = FnSink::new(|event: GenerationEvent| {
        if event.kind() == GenerationEventKind::Finished {
            count += 1;
        }
    });
    generate_with_events(
        &single_template(),
        &GenerateConfig::default(),
        &mut StdRng::seed_from_u64(4),
        &mut sink,
    )
    .unwrap();
    assert_eq!(count, 1);
}
