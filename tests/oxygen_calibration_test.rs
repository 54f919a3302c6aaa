// tests/oxygen_calibration_test.rs

use ndarray::{array, Array1};
use proptest::prelude::*;

use yuco_csv_render::data_analysis::oxygen_calibration::{
    compensated_concentration, saturation, uncompensated_concentration, water_vapor_pressure,
    CalibrationTable, SensorSample, STANDARD_ATMOSPHERE,
};
use yuco_csv_render::error::CalibrationError;

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_uncompensated_reference_values() {
    assert_close(uncompensated_concentration(20.0, 0.0), 6788.890246110814);
    assert_close(uncompensated_concentration(20.0, 30.0), 322.21860445908015);
    assert_close(uncompensated_concentration(12.5, 27.3), 554.8498226061453);
    assert_close(uncompensated_concentration(4.0, 35.0), 340.2718826002297);
}

#[test]
fn test_compensated_reference_values() {
    assert_close(compensated_concentration(250.0, 10.1325, 15.0, 35.0), 201.7079119070143);
    assert_close(compensated_concentration(250.0, 30.0, 15.0, 35.0), 201.8361497290883);
    assert_close(compensated_concentration(200.0, 12.0, 10.0, 0.0), 200.011952);
}

#[test]
fn test_saturation_reference_values() {
    assert_close(saturation(15.0, 35.0, 250.0), 98.38408248149872);
    assert_close(saturation(10.0, 0.0, 300.0), 85.08413018390826);
    assert_close(saturation(20.0, 37.5, 220.0), 96.70754892033443);
}

#[test]
fn test_full_chain_on_one_sample() {
    let derived = CalibrationTable::RBR_ODO.derive(&SensorSample {
        temperature_c: 12.5,
        pressure_bar: 25.0,
        phase_deg: 27.3,
        salinity_psu: 37.8,
    });
    assert_close(derived.raw_concentration, 554.8498226061453);
    assert_close(derived.compensated_concentration_umol_l, 438.2629739000951);
    assert_close(derived.saturation_percent, 166.78639629770566);
}

#[test]
fn test_solubility_matches_published_value() {
    let table = CalibrationTable::RBR_ODO;
    // Garcia-Gordon seawater at 20 °C, 35 PSU is about 5.17 mL/L.
    assert_close(table.solubility(20.0, 35.0), 5.169785625173756);
    assert_close(table.solubility(20.0, 0.0), 6.356913609398576);
    assert_close(table.solubility(0.0, 35.0), 8.026717825348367);
    assert_close(table.solubility(10.0, 35.0), 6.3161092792184546);
}

#[test]
fn test_vapor_pressure_reference_values() {
    assert_close(water_vapor_pressure(20.0), 0.23336536165106123);
    assert_close(water_vapor_pressure(15.0), 0.17022159712990212);
}

#[test]
fn test_salinity_direction() {
    let table = CalibrationTable::RBR_ODO;
    // Saltier water holds less oxygen...
    assert!(table.solubility(20.0, 35.0) < table.solubility(20.0, 0.0));
    // ...so the same concentration is a higher saturation.
    assert!(saturation(20.0, 35.0, 250.0) > saturation(20.0, 0.0, 250.0));
    // The salinity factor lowers the compensated concentration.
    assert!(compensated_concentration(250.0, STANDARD_ATMOSPHERE, 15.0, 35.0) < 250.0);
}

#[test]
fn test_upper_temperature_bound_is_not_finite() {
    assert!(!compensated_concentration(250.0, 10.0, 298.15, 35.0).is_finite());
    assert!(!saturation(298.15, 35.0, 250.0).is_finite());
    assert!(saturation(300.0, 35.0, 250.0).is_nan());
}

#[test]
fn test_nan_inputs_propagate() {
    assert!(uncompensated_concentration(f64::NAN, 30.0).is_nan());
    assert!(uncompensated_concentration(15.0, f64::NAN).is_nan());
    assert!(compensated_concentration(250.0, f64::NAN, 15.0, 35.0).is_nan());
    assert!(saturation(15.0, f64::NAN, 250.0).is_nan());
}

#[test]
fn test_series_match_scalar_stages() {
    let table = CalibrationTable::RBR_ODO;
    let temperature = array![12.5, 20.0, 4.0];
    let phase = array![27.3, 30.0, 35.0];
    let pressure = array![25.0, 10.1325, 1.0];
    let salinity = array![37.8, 35.0, 0.0];

    let series = table
        .derive_series(temperature.view(), phase.view(), pressure.view(), salinity.view())
        .expect("equal lengths");
    assert_eq!(series.len(), 3);
    for i in 0..3 {
        let expected = table.derive(&SensorSample {
            temperature_c: temperature[i],
            pressure_bar: pressure[i],
            phase_deg: phase[i],
            salinity_psu: salinity[i],
        });
        assert_eq!(series.raw_concentration[i], expected.raw_concentration);
        assert_eq!(
            series.compensated_concentration_umol_l[i],
            expected.compensated_concentration_umol_l
        );
        assert_eq!(series.saturation_percent[i], expected.saturation_percent);
    }
}

#[test]
fn test_series_length_mismatch_is_an_error() {
    let table = CalibrationTable::RBR_ODO;
    let temperature = array![12.5, 20.0];
    let salinity = array![35.0];
    let oxygen = array![250.0, 240.0];

    let err = table
        .saturation_series(temperature.view(), salinity.view(), oxygen.view())
        .expect_err("lengths differ");
    assert_eq!(
        err,
        CalibrationError::LengthMismatch {
            stage: "saturation",
            reference: "temperature",
            expected: 2,
            input: "salinity",
            found: 1,
        }
    );
}

#[test]
fn test_empty_series() {
    let empty = Array1::<f64>::zeros(0);
    let series = CalibrationTable::RBR_ODO
        .derive_series(empty.view(), empty.view(), empty.view(), empty.view())
        .expect("empty inputs");
    assert!(series.is_empty());
}

fn sample_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-2.0..35.0f64, 10.0..60.0f64, 0.0..200.0f64, 0.0..40.0f64)
}

proptest! {
    #[test]
    fn prop_derivation_is_deterministic((t, phase, p, s) in sample_strategy()) {
        let sample = SensorSample { temperature_c: t, pressure_bar: p, phase_deg: phase, salinity_psu: s };
        let first = CalibrationTable::RBR_ODO.derive(&sample);
        let second = CalibrationTable::RBR_ODO.derive(&sample);
        prop_assert_eq!(first.raw_concentration.to_bits(), second.raw_concentration.to_bits());
        prop_assert_eq!(
            first.compensated_concentration_umol_l.to_bits(),
            second.compensated_concentration_umol_l.to_bits()
        );
        prop_assert_eq!(first.saturation_percent.to_bits(), second.saturation_percent.to_bits());
    }

    #[test]
    fn prop_series_elements_are_independent(
        samples in proptest::collection::vec(sample_strategy(), 1..20),
        replacement in sample_strategy(),
        index in any::<proptest::sample::Index>(),
    ) {
        let table = CalibrationTable::RBR_ODO;
        let columns = |samples: &[(f64, f64, f64, f64)]| {
            let t: Array1<f64> = samples.iter().map(|s| s.0).collect();
            let phase: Array1<f64> = samples.iter().map(|s| s.1).collect();
            let p: Array1<f64> = samples.iter().map(|s| s.2).collect();
            let sal: Array1<f64> = samples.iter().map(|s| s.3).collect();
            table
                .derive_series(t.view(), phase.view(), p.view(), sal.view())
                .expect("equal lengths")
        };

        let changed = index.index(samples.len());
        let mut modified = samples.clone();
        modified[changed] = replacement;

        let before = columns(&samples);
        let after = columns(&modified);
        for i in (0..samples.len()).filter(|&i| i != changed) {
            prop_assert_eq!(before.saturation_percent[i].to_bits(), after.saturation_percent[i].to_bits());
            prop_assert_eq!(
                before.compensated_concentration_umol_l[i].to_bits(),
                after.compensated_concentration_umol_l[i].to_bits()
            );
        }
    }

    #[test]
    fn prop_compensation_grows_with_pressure(
        t in -2.0..35.0f64,
        s in 0.0..40.0f64,
        p in 0.0..200.0f64,
        dp in 0.5..50.0f64,
    ) {
        let shallow = compensated_concentration(250.0, p, t, s);
        let deep = compensated_concentration(250.0, p + dp, t, s);
        prop_assert!(deep > shallow);
    }
}
