//! End-to-end checks of both estimators against graphs with known ranks.

use rapid_pagerank::pagerank::observer::ConvergenceTrace;
use rapid_pagerank::{
    iterate_rank, sample_rank, transition, DanglingPolicy, GraphBuilder, IterativePageRank,
    LinkGraph, RankConfig, RankError, SamplingPageRank,
};

fn two_page_cycle() -> LinkGraph {
    LinkGraph::from_adjacency([("1.html", vec!["2.html"]), ("2.html", vec!["1.html"])]).unwrap()
}

/// The small corpus shipped with the reference exercise.
fn corpus0() -> LinkGraph {
    LinkGraph::from_adjacency([
        ("1.html", vec!["2.html"]),
        ("2.html", vec!["1.html", "3.html"]),
        ("3.html", vec!["2.html", "4.html"]),
        ("4.html", vec!["2.html"]),
    ])
    .unwrap()
}

#[test]
fn sampling_two_page_cycle_is_even_across_seeds() {
    let graph = two_page_cycle();
    for seed in [0, 1, 2, 3, 4] {
        let ranks = SamplingPageRank::new()
            .with_samples(100_000)
            .with_seed(seed)
            .run(&graph)
            .unwrap();
        for (_, score) in ranks.iter() {
            assert!((score - 0.5).abs() < 0.02, "seed {seed}: {score}");
        }
    }
}

#[test]
fn iteration_two_page_cycle_is_even_for_any_damping() {
    let graph = two_page_cycle();
    for damping in [0.01, 0.3, 0.85, 0.999] {
        let ranks = iterate_rank(&graph, damping).unwrap();
        assert!((ranks.get("1.html").unwrap() - 0.5).abs() < 1e-3);
        assert!((ranks.get("2.html").unwrap() - 0.5).abs() < 1e-3);
    }
}

#[test]
fn estimators_agree_on_corpus0() {
    let graph = corpus0();
    let iterated = IterativePageRank::new().with_threshold(1e-9).run(&graph).unwrap();
    let sampled = SamplingPageRank::new()
        .with_samples(200_000)
        .with_seed(2024)
        .run(&graph)
        .unwrap();

    assert!(iterated.distribution.max_abs_diff(&sampled) < 0.02);

    // Reference values for corpus0 at d = 0.85
    let expected = [
        ("1.html", 0.2199),
        ("2.html", 0.4292),
        ("3.html", 0.2199),
        ("4.html", 0.1310),
    ];
    for (page, score) in expected {
        let got = iterated.distribution.get(page).unwrap();
        assert!((got - score).abs() < 1e-3, "{page}: {got}");
    }
}

#[test]
fn every_distribution_sums_to_one() {
    let mut builder = GraphBuilder::new();
    builder.add_links("a", ["b", "c", "d"]);
    builder.add_links("b", ["c"]);
    builder.add_links("c", ["a"]);
    builder.add_page("d");
    let graph = builder.build().unwrap();

    let config = RankConfig {
        seed: Some(17),
        samples: 5_000,
        ..RankConfig::default()
    };
    let sampled = config.sampler().run(&graph).unwrap();
    assert!((sampled.sum() - 1.0).abs() < 1e-6);

    for dangling in [DanglingPolicy::Ignore, DanglingPolicy::Redistribute] {
        let iterated = config.iterator().with_dangling(dangling).run(&graph).unwrap();
        assert!((iterated.distribution.sum() - 1.0).abs() < 1e-6);
        assert_eq!(iterated.distribution.len(), 4);
    }

    for page in ["a", "b", "c", "d"] {
        let row = transition(&graph, page, 0.85).unwrap();
        assert!((row.sum() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn single_page_graph_ranks_one() {
    let graph = LinkGraph::from_adjacency([("only.html", Vec::<&str>::new())]).unwrap();

    let sampled = sample_rank(&graph, 0.85, 1_000).unwrap();
    let iterated = iterate_rank(&graph, 0.85).unwrap();

    assert!((sampled.get("only.html").unwrap() - 1.0).abs() < 1e-9);
    assert!((iterated.get("only.html").unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn restarting_from_converged_ranks_stops_after_one_round() {
    let graph = corpus0();
    let pr = IterativePageRank::new();
    let converged = pr.run(&graph).unwrap();

    let mut trace = ConvergenceTrace::new();
    let again = pr.run_observed(&graph, &mut trace).unwrap();
    assert_eq!(trace.rounds(), converged.iterations);

    let restarted = pr.run_from(&graph, &again.distribution).unwrap();
    assert_eq!(restarted.iterations, 1);
    assert!(restarted.delta < 1e-3);
}

#[test]
fn errors_are_raised_before_computation() {
    let graph = corpus0();

    assert!(matches!(
        iterate_rank(&LinkGraph::default(), 0.85),
        Err(RankError::EmptyGraph)
    ));
    assert!(matches!(
        sample_rank(&LinkGraph::default(), 0.85, 10),
        Err(RankError::EmptyGraph)
    ));
    assert!(matches!(
        transition(&graph, "missing", 0.85),
        Err(RankError::InvalidPage(_))
    ));
    assert!(matches!(
        sample_rank(&graph, 0.0, 10),
        Err(RankError::InvalidDamping(_))
    ));
}

#[test]
fn graph_is_shared_across_threads() {
    let graph = corpus0();
    std::thread::scope(|scope| {
        let handles: Vec<_> = [0.5, 0.7, 0.85]
            .into_iter()
            .map(|damping| {
                let graph = &graph;
                scope.spawn(move || iterate_rank(graph, damping).unwrap())
            })
            .collect();
        for handle in handles {
            let ranks = handle.join().unwrap();
            assert!((ranks.sum() - 1.0).abs() < 1e-6);
        }
    });
}
