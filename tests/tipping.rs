use fuzzy_tip::{
    compute_tip, DefuzzificationOp, FuzzyError, JsonPresenter, MamdaniInference, Presenter, TipSystem, ZeroAggregate,
};

#[test]
fn test_three_scenarios_order() {
    let worst = compute_tip(0., 0.).unwrap();
    let average = compute_tip(5., 5.).unwrap();
    let best = compute_tip(10., 10.).unwrap();

    assert!(worst < 10., "{worst}");
    assert!((10. ..=20.).contains(&average), "{average}");
    assert!(best > 20., "{best}");
    // Cheap and generous terms mirror each other, as do the extremes of both inputs
    assert!((worst + best - 30.).abs() < 1e-9, "{worst} {best}");
}

#[test]
fn test_service_dominates_with_neutral_food() {
    let system = TipSystem::new().unwrap();
    let tips: Vec<f64> = (0..=10).map(|s| system.compute_tip(5., f64::from(s)).unwrap()).collect();

    assert!(tips[0] < tips[5] && tips[5] < tips[10], "{tips:?}");
}

#[test]
fn test_every_method_lands_in_the_tip_universe() {
    for name in ["centroid", "bisector", "mom", "som", "lom"] {
        let method: DefuzzificationOp = name.parse().unwrap();
        let model = MamdaniInference::default().with_defuzzification(method).with_zero_aggregate(ZeroAggregate::Error);
        let system = TipSystem::with_model(model).unwrap();

        for (food, service) in [(0., 0.), (2.5, 7.5), (5., 5.), (10., 10.)] {
            let tip = system.compute_tip(food, service).unwrap();
            assert!((0. ..=30.).contains(&tip), "{name} {food} {service} {tip}");
        }
    }
}

#[test]
fn test_unsupported_method() {
    assert_eq!(
        "weighted".parse::<DefuzzificationOp>(),
        Err(FuzzyError::UnsupportedMethod("weighted".to_owned()))
    );
}

#[test]
fn test_presenter_gets_the_full_report() {
    let report = TipSystem::new().unwrap().compute_tip_verbose(3., 8.).unwrap();
    let mut presenter = JsonPresenter::new(Vec::new(), true);

    presenter.present(&report).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&presenter.into_inner()).unwrap();
    let aggregated = json["aggregated"].as_array().unwrap();

    assert_eq!(aggregated.len(), 31);
    assert_eq!(json["food_quality"], 3.);
    assert_eq!(json["service_quality"], 8.);
    assert_eq!(json["rules"][2]["consequence"], "generous");
}
