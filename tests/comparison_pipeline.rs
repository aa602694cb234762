// tests/comparison_pipeline.rs
//
// Cohort-level properties of the comparison path:
// metrics → normalization → weights → aggregation → ranking.
// Randomized cohorts use a seeded RNG so failures are reproducible.

use rand::{rngs::StdRng, Rng, SeedableRng};

use supplier_readiness::signals::{DemoSummary, PricingSignals, RequirementsCoverage, RiskFlag, Severity};
use supplier_readiness::{
    aggregate_scores, compare_cohort, compute_base_metrics, normalize_across_cohort,
    rank_breakdowns, resolve_weights, ExtractedSignals, MetricName, MetricWeights, WeightOverride,
};

fn words(n: usize) -> Option<Vec<String>> {
    Some((0..n).map(|i| format!("item {i}")).collect())
}

fn random_supplier(rng: &mut StdRng, idx: usize) -> ExtractedSignals {
    let mut s = ExtractedSignals::for_supplier(format!("s{idx}"), format!("Supplier {idx}"));
    if rng.random_bool(0.8) {
        s.requirements_coverage = Some(RequirementsCoverage {
            coverage_percentage: Some(rng.random_range(0.0..=100.0)),
            requirements: None,
        });
    }
    if rng.random_bool(0.7) {
        s.pricing = Some(PricingSignals {
            total_cost: Some(rng.random_range(10_000.0..500_000.0)),
            ..Default::default()
        });
    }
    s.technical_claims = words(rng.random_range(0..15));
    s.differentiators = words(rng.random_range(0..10));
    s.assumptions = words(rng.random_range(0..12));
    s.risks = Some(
        (0..rng.random_range(0..12))
            .map(|i| RiskFlag {
                description: format!("risk {i}"),
                severity: Severity::Medium,
            })
            .collect(),
    );
    if rng.random_bool(0.5) {
        s.demo = Some(DemoSummary {
            capabilities: words(rng.random_range(0..8)).unwrap_or_default(),
            gaps: words(rng.random_range(0..8)).unwrap_or_default(),
            overall_rating: None,
        });
    }
    s
}

#[test]
fn single_supplier_pricing_is_100_with_cost_and_50_without() {
    let mut with_cost = ExtractedSignals::for_supplier("a", "A");
    with_cost.pricing = Some(PricingSignals {
        total_cost: Some(42_000.0),
        ..Default::default()
    });
    let without_cost = ExtractedSignals::for_supplier("b", "B");

    let n = normalize_across_cohort(&[compute_base_metrics(&with_cost)]);
    assert_eq!(n[0].pricing_competitiveness, 100.0);

    let n = normalize_across_cohort(&[compute_base_metrics(&without_cost)]);
    assert_eq!(n[0].pricing_competitiveness, 50.0);
}

#[test]
fn randomized_cohorts_hold_normalization_and_bound_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..200 {
        let size = rng.random_range(0..9);
        let cohort: Vec<_> = (0..size).map(|i| random_supplier(&mut rng, i)).collect();

        let base: Vec<_> = cohort.iter().map(compute_base_metrics).collect();
        let normalized = normalize_across_cohort(&base);
        assert_eq!(normalized.len(), cohort.len(), "round {round}");

        // order preserved
        for (i, m) in normalized.iter().enumerate() {
            assert_eq!(m.supplier.supplier_id, format!("s{i}"));
        }

        // every metric bounded
        for m in &normalized {
            for metric in MetricName::ALL {
                let v = m.get(metric);
                assert!((0.0..=100.0).contains(&v), "{metric} out of range: {v}");
            }
        }

        // cheapest → 100, dearest → 0 when costs differ
        let costs: Vec<(usize, f64)> = base
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.total_cost.map(|c| (i, c)))
            .collect();
        if costs.len() >= 2 {
            let (imin, min) = costs
                .iter()
                .copied()
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap();
            let (imax, max) = costs
                .iter()
                .copied()
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap();
            if min < max {
                assert_eq!(normalized[imin].pricing_competitiveness, 100.0);
                assert_eq!(normalized[imax].pricing_competitiveness, 0.0);
            }
        }

        // totals within [0, Σ weights]
        let weights = MetricWeights {
            differentiators: rng.random_range(0.0..40.0),
            ..MetricWeights::default()
        };
        let upper = weights.sum().round() as i64;
        for b in aggregate_scores(&normalized, &weights) {
            assert!(b.total_score >= 0 && b.total_score <= upper);
        }
    }
}

#[test]
fn resolve_weights_with_no_overrides_is_identity() {
    let d = MetricWeights::default();
    assert_eq!(resolve_weights(&d, Some(&[][..])).into_weights(), d);
}

#[test]
fn full_pipeline_ranks_and_explains() {
    let mut strong = ExtractedSignals::for_supplier("strong", "Strong Ltd");
    strong.requirements_coverage = Some(RequirementsCoverage {
        coverage_percentage: Some(95.0),
        requirements: None,
    });
    strong.technical_claims = words(10);
    strong.pricing = Some(PricingSignals {
        total_cost: Some(300_000.0),
        ..Default::default()
    });

    let mut cheap = ExtractedSignals::for_supplier("cheap", "Cheap Inc");
    cheap.requirements_coverage = Some(RequirementsCoverage {
        coverage_percentage: Some(55.0),
        requirements: None,
    });
    cheap.pricing = Some(PricingSignals {
        total_cost: Some(100_000.0),
        ..Default::default()
    });

    let cohort = vec![cheap, strong];

    // Defaults: coverage outweighs price difference.
    let out = compare_cohort(&cohort, None, &MetricWeights::default());
    assert_eq!(out.rankings[0].breakdown.supplier.supplier_id, "strong");
    let contributions = &out.rankings[0].breakdown.contributions;
    assert_eq!(contributions.len(), 7);
    assert_eq!(contributions[&MetricName::PricingCompetitiveness], 0.0);

    // A price-driven matrix flips the order.
    let matrix = vec![
        WeightOverride::new("pricingCompetitiveness", 80.0),
        WeightOverride::new("requirementsCoverage", 10.0),
    ];
    let out = compare_cohort(&cohort, Some(matrix.as_slice()), &MetricWeights::default());
    assert_eq!(out.rankings[0].breakdown.supplier.supplier_id, "cheap");
    assert_eq!(out.weights.pricing_competitiveness, 80.0);
    assert!(out.unknown_weight_ids.is_empty());
}

#[test]
fn ranking_is_stable_for_identical_responses() {
    let cohort: Vec<_> = (0..4)
        .map(|i| ExtractedSignals::for_supplier(format!("twin{i}"), "Twin"))
        .collect();
    let base: Vec<_> = cohort.iter().map(compute_base_metrics).collect();
    let ranked = rank_breakdowns(aggregate_scores(
        &normalize_across_cohort(&base),
        &MetricWeights::default(),
    ));
    let order: Vec<usize> = ranked.iter().map(|r| r.submission_index).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}
