use approx::assert_relative_eq;

use chaintally::{p_value_report, ReportError};

#[test]
fn ensemble_entirely_below_gives_zero_bound() {
    let report = p_value_report("cut_edges", [0.1, 0.5, 0.9], 1.0).unwrap();
    assert_eq!(report.fraction_higher, 0.0);
    assert_eq!(report.p_value, 0.0);
    assert_relative_eq!(report.opposite_p_value, 2.0f64.sqrt());
}

#[test]
fn ensemble_entirely_above_gives_sqrt_two_unclamped() {
    let report = p_value_report("cut_edges", [2.0, 3.0, 4.0], 1.0).unwrap();
    assert_eq!(report.fraction_higher, 1.0);
    assert_relative_eq!(report.p_value, 2.0f64.sqrt());
    assert_eq!(report.opposite_p_value, 0.0);
}

#[test]
fn vacuous_bounds_above_one_are_reported_as_is() {
    // 3 of 4 scores above the initial plan: bound sqrt(1.5) > 1.
    let report = p_value_report("deviation", [2.0, 3.0, 4.0, 0.5], 1.0).unwrap();
    assert!(report.p_value > 1.0);
    assert_relative_eq!(report.p_value, 1.5f64.sqrt());
    // The two bounds are independent; nothing forces them to sum to one.
    assert_relative_eq!(report.opposite_p_value, 0.5f64.sqrt());
}

#[test]
fn initial_score_need_not_be_an_ensemble_member() {
    let report = p_value_report("splits", [1.0, 2.0, 4.0, 5.0], 3.0).unwrap();
    assert_relative_eq!(report.fraction_higher, 0.5);
}

#[test]
fn empty_ensemble_fails_instead_of_dividing_by_zero() {
    assert_eq!(
        p_value_report("anything", std::iter::empty(), 0.0),
        Err(ReportError::EmptyEnsemble)
    );
}

#[test]
fn report_serializes_with_exactly_the_five_fields() {
    let report = p_value_report("splits", [1.0, 2.0, 3.0, 4.0, 5.0], 3.0).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 5);
    assert_eq!(object["name"], "splits");
    assert_eq!(object["initial_plan_score"], 3.0);
    assert_relative_eq!(object["p_value"].as_f64().unwrap(), 0.8f64.sqrt());
}
