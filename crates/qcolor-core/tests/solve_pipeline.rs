//! Integration tests for sampling, selection and decoding.

use qcolor_core::{
    build_coloring_qubo, check_feasibility, decode, gnm_random_graph, AnnealingConfig,
    ColoringPipeline, ColoringSolver, ExactSampler, Graph, NodeOrder, PenaltyWeights, QColorError,
    SampleSet, Sampler, SimulatedAnnealingSampler, SolverConfig,
};

fn triangle() -> Graph {
    Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
}

#[test]
fn test_annealing_solution_is_an_exact_ground_state() {
    env_logger::try_init().ok();

    let graph = triangle();
    let order = NodeOrder::natural(&graph);
    let model = build_coloring_qubo(&graph, &order, 3, PenaltyWeights::default()).unwrap();

    let coloring = ColoringSolver::new(SimulatedAnnealingSampler::seeded(2024))
        .solve(&model, 3, 50)
        .unwrap();

    let possible: Vec<Vec<(usize, usize)>> = ExactSampler::new()
        .ground_states(&model)
        .unwrap()
        .iter()
        .map(|s| decode(&s.assignment, 3).unwrap().pairs())
        .collect();

    assert!(
        possible.contains(&coloring.pairs()),
        "{:?} is not among the ground states {:?}",
        coloring.pairs(),
        possible
    );
}

#[test]
fn test_selected_sample_is_minimal() {
    let graph = gnm_random_graph(6, 8, 11).unwrap();
    let order = NodeOrder::natural(&graph);
    let model = build_coloring_qubo(&graph, &order, 3, PenaltyWeights::default()).unwrap();

    let sampler = SimulatedAnnealingSampler::new(AnnealingConfig {
        num_sweeps: 50,
        beta_range: None,
        seed: Some(5),
    })
    .unwrap();
    let samples = sampler.sample(&model, 30).unwrap();
    let all_energies: Vec<f64> = samples.iter().map(|s| s.energy).collect();

    let set = SampleSet::aggregate(samples);
    let best = set.lowest().unwrap();
    assert!(all_energies.iter().all(|&e| best.sample.energy <= e));
    let total: usize = set.entries().iter().map(|e| e.num_occurrences).sum();
    assert_eq!(total, 30);

    // The solver picks the same sample from the same reads
    let report = ColoringSolver::new(sampler)
        .solve_with_report(&model, 3, 30)
        .unwrap();
    assert_eq!(report.energy, best.sample.energy);
    assert_eq!(
        report.coloring,
        decode(&best.sample.assignment, 3).unwrap()
    );
}

#[test]
fn test_one_hot_decoding_round_trip() {
    let k = 4;
    let colors = [3, 0, 2, 2, 1];
    let mut assignment = vec![0u8; colors.len() * k];
    for (p, &c) in colors.iter().enumerate() {
        assignment[p * k + c] = 1;
    }
    let coloring = decode(&assignment, k).unwrap();
    assert_eq!(coloring.assignments.len(), colors.len());
    for (p, pair) in coloring.pairs().into_iter().enumerate() {
        assert_eq!(pair, (p, colors[p]));
        assert!(pair.1 < k);
    }
}

#[test]
fn test_pipeline_with_permuted_order_validates_by_vertex() {
    // 4-cycle, enumerated in a scrambled order
    let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    let order = NodeOrder::from_vertices(vec![2, 0, 3, 1]).unwrap();
    let config = SolverConfig {
        num_colors: 2,
        num_reads: 1,
        ..SolverConfig::default()
    };
    let outcome = ColoringPipeline::new(config, ExactSampler::new())
        .unwrap()
        .run_with_order(&graph, order)
        .unwrap();

    assert!(outcome.feasibility.feasible);
    let colors = outcome.vertex_colors().unwrap();
    for (u, v) in graph.edges() {
        assert_ne!(colors[u], colors[v]);
    }

    // Reading the same coloring with the natural order is wrong on purpose
    let natural = NodeOrder::natural(&graph);
    let misread = check_feasibility(&graph, &natural, &outcome.report.coloring).unwrap();
    assert!(!misread.feasible);
}

#[test]
fn test_too_few_colors_reports_infeasible_without_error() {
    env_logger::try_init().ok();

    let config = SolverConfig {
        num_colors: 2,
        num_reads: 5,
        ..SolverConfig::default()
    };
    let outcome = ColoringPipeline::new(config, ExactSampler::new())
        .unwrap()
        .run(&triangle())
        .unwrap();
    assert!(!outcome.feasibility.feasible);
}

#[test]
fn test_annealing_pipeline_colors_random_graph() {
    let graph = gnm_random_graph(8, 10, 99).unwrap();
    let config = SolverConfig {
        num_colors: 4,
        num_reads: 20,
        annealing: AnnealingConfig {
            seed: Some(17),
            ..AnnealingConfig::default()
        },
        ..SolverConfig::default()
    };
    let outcome = ColoringPipeline::with_annealing(config)
        .unwrap()
        .run(&graph)
        .unwrap();

    assert_eq!(outcome.model_stats.num_variables, 32);
    assert_eq!(outcome.report.num_reads, 20);
    assert!(outcome.feasibility.feasible, "{:?}", outcome.feasibility);
}

#[test]
fn test_error_taxonomy() {
    let graph = triangle();
    let order = NodeOrder::natural(&graph);
    let model = build_coloring_qubo(&graph, &order, 3, PenaltyWeights::default()).unwrap();

    let solver = ColoringSolver::new(ExactSampler::new());
    assert!(matches!(
        solver.solve(&model, 3, 0),
        Err(QColorError::InvalidParameter(_))
    ));

    let big = gnm_random_graph(9, 10, 0).unwrap();
    let big_model =
        build_coloring_qubo(&big, &NodeOrder::natural(&big), 3, PenaltyWeights::default())
            .unwrap();
    let err = solver.solve(&big_model, 3, 1).unwrap_err();
    assert!(matches!(err, QColorError::SolverUnavailable(_)));
    assert!(err.is_retriable());
}
