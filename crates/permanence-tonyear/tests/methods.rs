//! Cross-method checks on a published impulse response baseline.
//!
//! These tests run the accounting methods the way the published analysis
//! does: evaluate an IRF curve over a 1000-year grid, then compare a
//! delayed emission against it over a 100-year horizon.

use approx::assert_relative_eq;
use permanence_tonyear::{calculate_benefit, IrfCurve, Method};

const HORIZON: usize = 100;
const DELAY: usize = 10;

fn joos_baseline() -> Vec<f64> {
    IrfCurve::Joos2013.curve(1000).to_vec()
}

#[test]
fn all_methods_yield_positive_benefit() {
    let baseline = joos_baseline();

    for method in [Method::MouraCosta, Method::Ipcc, Method::Lashof] {
        let report = calculate_benefit(method, &baseline, HORIZON, DELAY, 0.0).unwrap();

        assert!(
            report.benefit > 0.0,
            "{} benefit should be positive, got {}",
            method,
            report.benefit
        );
        assert!(report.baseline_atm_impact > 0.0);
        assert_relative_eq!(
            report.num_for_equivalence,
            report.baseline_atm_impact / report.benefit,
            max_relative = 1e-12
        );
    }
}

#[test]
fn horizon_methods_need_more_storage_than_moura_costa() {
    // Moura-Costa credits the storage period itself, which is known to
    // produce far smaller equivalence ratios than the horizon-based
    // methods on a slowly-decaying baseline
    let baseline = joos_baseline();

    let mc = calculate_benefit(Method::MouraCosta, &baseline, HORIZON, DELAY, 0.0).unwrap();
    let ipcc = calculate_benefit(Method::Ipcc, &baseline, HORIZON, DELAY, 0.0).unwrap();
    let lashof = calculate_benefit(Method::Lashof, &baseline, HORIZON, DELAY, 0.0).unwrap();

    assert!(mc.num_for_equivalence < ipcc.num_for_equivalence);
    assert!(mc.num_for_equivalence < lashof.num_for_equivalence);
}

#[test]
fn undiscounted_ipcc_and_lashof_agree() {
    // With no discounting, both horizon methods measure the same quantity:
    // the baseline burden displaced across the horizon boundary
    let baseline = joos_baseline();

    let ipcc = calculate_benefit(Method::Ipcc, &baseline, HORIZON, DELAY, 0.0).unwrap();
    let lashof = calculate_benefit(Method::Lashof, &baseline, HORIZON, DELAY, 0.0).unwrap();

    assert_relative_eq!(ipcc.benefit, lashof.benefit, max_relative = 1e-9);
}

#[test]
fn longer_delays_buy_larger_benefits() {
    let baseline = joos_baseline();

    for method in [Method::MouraCosta, Method::Ipcc, Method::Lashof] {
        let short = calculate_benefit(method, &baseline, HORIZON, 5, 0.0).unwrap();
        let long = calculate_benefit(method, &baseline, HORIZON, 50, 0.0).unwrap();

        assert!(
            long.benefit > short.benefit,
            "{}: delay 50 should beat delay 5 ({} vs {})",
            method,
            long.benefit,
            short.benefit
        );
    }
}
