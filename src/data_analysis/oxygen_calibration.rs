// src/data_analysis/oxygen_calibration.rs

//! Legato3 T.ODO oxygen calibration.
//!
//! Three chained stages turn the optode's raw phase into oxygen values:
//!
//! 1. [`CalibrationTable::uncompensated_concentration`] evaluates the optode
//!    polynomial surface in (temperature, phase).
//! 2. [`CalibrationTable::compensated_concentration`] applies the pressure
//!    factor and the Garcia-Gordon salinity factor.
//! 3. [`CalibrationTable::saturation`] normalises by Garcia-Gordon solubility
//!    and the water vapour pressure.
//!
//! Everything here is plain IEEE-754 arithmetic. Out-of-domain inputs (for
//! example T >= 298.15 °C, where the scaled temperature takes the log of a
//! non-positive number) yield NaN or infinity instead of an error, so one
//! corrupt sample never aborts a batch.

use ndarray::{Array1, ArrayView1, Zip};

use crate::error::CalibrationError;

/// Standard atmosphere in the pressure unit the optode equations use.
pub const STANDARD_ATMOSPHERE: f64 = 10.1325;

/// Converts µmol/L over mL/L solubility into percent saturation (100 / 44.659).
pub const UMOL_PER_ML_SATURATION_FACTOR: f64 = 2.23916;

const KELVIN_OFFSET: f64 = 273.15;
const SCALED_TEMPERATURE_UPPER: f64 = 298.15;

/// Stern-Volmer optode polynomial coefficients `C0..C23`.
///
/// `C2`/`C3` form the affine phase transform `Q = C2 + C3 * phase`; the
/// remaining coefficients are five temperature cubics, one per power of `Q`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptodeCoefficients {
    pub c: [f64; 24],
}

impl OptodeCoefficients {
    /// Factory calibration of the Legato3 T.ODO optode.
    pub const RBR_ODO: Self = Self {
        c: [
            0.0,           // C0
            1.1470973,     // C1
            0.0,           // C2
            1.0,           // C3
            8.064644e3,    // C4
            -123.6473,     // C5
            887.36467e-3,  // C6
            -3.540336e-3,  // C7
            -583.84781,    // C8
            6.133689,      // C9
            -23.49897e-3,  // C10
            46.16926e-6,   // C11
            16.68928,      // C12
            -109.2825e-3,  // C13
            160.3017e-6,   // C14
            0.0,           // C15
            -218.08701e-3, // C16
            685.75898e-6,  // C17
            0.0,           // C18
            0.0,           // C19
            1.0811971e-3,  // C20
            0.0,           // C21
            0.0,           // C22
            0.0,           // C23
        ],
    };

    /// Temperature cubic starting at coefficient index `first`.
    #[inline]
    fn temperature_cubic(&self, first: usize, temperature: f64) -> f64 {
        self.c[first]
            + self.c[first + 1] * temperature
            + self.c[first + 2] * temperature.powi(2)
            + self.c[first + 3] * temperature.powi(3)
    }
}

/// Garcia-Gordon solubility coefficients shared by compensation and saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolubilityCoefficients {
    /// `GA0..GA5`, temperature polynomial of the solubility.
    pub a: [f64; 6],
    /// `GB0..GB3`, salinity slope polynomial.
    pub b: [f64; 4],
    /// `GC0`, quadratic salinity term.
    pub c0: f64,
}

impl SolubilityCoefficients {
    /// Garcia & Gordon (1992) combined fit, mL/L.
    pub const GARCIA_GORDON: Self = Self {
        a: [2.00856, 3.224, 3.99063, 4.80299, 9.78188e-1, 1.71069],
        b: [-6.24097e-3, -6.93498e-3, -6.90358e-3, -4.29155e-3],
        c0: -3.11680e-7,
    };

    /// `Sal * (GB0 + GB1*TS + GB2*TS^2 + GB3*TS^3) + GC0 * Sal^2`
    #[inline]
    fn salinity_exponent(&self, scaled_temperature: f64, salinity: f64) -> f64 {
        let ts = scaled_temperature;
        let slope = self.b[0] + self.b[1] * ts + self.b[2] * ts.powi(2) + self.b[3] * ts.powi(3);
        salinity * slope + self.c0 * salinity.powi(2)
    }

    /// `GA0 + GA1*TS + ... + GA5*TS^5`
    #[inline]
    fn temperature_exponent(&self, scaled_temperature: f64) -> f64 {
        self.a
            .iter()
            .enumerate()
            .fold(0.0, |acc, (power, coefficient)| {
                acc + coefficient * scaled_temperature.powi(power as i32)
            })
    }
}

/// Linear pressure compensation `FCP = 1 + (P - reference) * coefficient`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureCoefficients {
    pub reference_pressure: f64,
    pub coefficient: f64,
}

impl PressureCoefficients {
    pub const RBR_ODO: Self = Self {
        reference_pressure: STANDARD_ATMOSPHERE,
        coefficient: 32e-6,
    };
}

/// The complete, immutable coefficient set injected into every stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationTable {
    pub optode: OptodeCoefficients,
    pub solubility: SolubilityCoefficients,
    pub pressure: PressureCoefficients,
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::RBR_ODO
    }
}

/// One timestamp of raw sensor values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature_c: f64,
    pub pressure_bar: f64,
    pub phase_deg: f64,
    pub salinity_psu: f64,
}

/// Oxygen values derived from one [`SensorSample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedOxygenSample {
    pub raw_concentration: f64,
    pub compensated_concentration_umol_l: f64,
    pub saturation_percent: f64,
}

/// Derived oxygen series for a whole batch, index-aligned with the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct OxygenSeries {
    pub raw_concentration: Array1<f64>,
    pub compensated_concentration_umol_l: Array1<f64>,
    pub saturation_percent: Array1<f64>,
}

impl OxygenSeries {
    pub fn len(&self) -> usize {
        self.raw_concentration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_concentration.is_empty()
    }
}

/// Benson-Krause scaled temperature `ln((298.15 - T) / (273.15 + T))`.
#[inline]
pub fn scaled_temperature(temperature_c: f64) -> f64 {
    ((SCALED_TEMPERATURE_UPPER - temperature_c) / (KELVIN_OFFSET + temperature_c)).ln()
}

/// Water vapour pressure over seawater, in bar.
#[inline]
pub fn water_vapor_pressure(temperature_c: f64) -> f64 {
    let kelvin = temperature_c + KELVIN_OFFSET;
    (52.57 - (6690.9 / kelvin) - 4.6818 * kelvin.ln()).exp() / 100.0
}

impl CalibrationTable {
    pub const RBR_ODO: Self = Self {
        optode: OptodeCoefficients::RBR_ODO,
        solubility: SolubilityCoefficients::GARCIA_GORDON,
        pressure: PressureCoefficients::RBR_ODO,
    };

    /// Stage 1: raw concentration from temperature (°C) and optode phase (degrees).
    pub fn uncompensated_concentration(&self, temperature_c: f64, phase_deg: f64) -> f64 {
        let c = &self.optode.c;
        let q = c[2] + c[3] * phase_deg;

        let mut blocks = 0.0;
        for (power, first) in [4usize, 8, 12, 16, 20].into_iter().enumerate() {
            blocks += self.optode.temperature_cubic(first, temperature_c) * q.powi(power as i32);
        }
        c[0] + c[1] * blocks
    }

    /// Stage 2: pressure (bar) and salinity (PSU) compensated concentration, µmol/L.
    pub fn compensated_concentration(
        &self,
        raw_concentration: f64,
        pressure_bar: f64,
        temperature_c: f64,
        salinity_psu: f64,
    ) -> f64 {
        let fcp = 1.0 + (pressure_bar - self.pressure.reference_pressure) * self.pressure.coefficient;
        let ts = scaled_temperature(temperature_c);
        let fcs = self.solubility.salinity_exponent(ts, salinity_psu).exp();
        raw_concentration * fcp * fcs
    }

    /// Garcia-Gordon oxygen solubility at one atmosphere, mL/L.
    pub fn solubility(&self, temperature_c: f64, salinity_psu: f64) -> f64 {
        let ts = scaled_temperature(temperature_c);
        (self.solubility.salinity_exponent(ts, salinity_psu)
            + self.solubility.temperature_exponent(ts))
        .exp()
    }

    /// Stage 3: percent saturation of a compensated concentration.
    pub fn saturation(
        &self,
        temperature_c: f64,
        salinity_psu: f64,
        compensated_concentration_umol_l: f64,
    ) -> f64 {
        let solubility = self.solubility(temperature_c, salinity_psu);
        let vapor = water_vapor_pressure(temperature_c);
        let humidity_correction =
            (STANDARD_ATMOSPHERE - vapor) / (self.pressure.reference_pressure - vapor);
        UMOL_PER_ML_SATURATION_FACTOR * humidity_correction * compensated_concentration_umol_l
            / solubility
    }

    /// Runs the three stages in order on one sample.
    pub fn derive(&self, sample: &SensorSample) -> DerivedOxygenSample {
        let raw = self.uncompensated_concentration(sample.temperature_c, sample.phase_deg);
        let compensated = self.compensated_concentration(
            raw,
            sample.pressure_bar,
            sample.temperature_c,
            sample.salinity_psu,
        );
        DerivedOxygenSample {
            raw_concentration: raw,
            compensated_concentration_umol_l: compensated,
            saturation_percent: self.saturation(
                sample.temperature_c,
                sample.salinity_psu,
                compensated,
            ),
        }
    }

    /// Stage 1 applied elementwise.
    pub fn uncompensated_series(
        &self,
        temperature_c: ArrayView1<f64>,
        phase_deg: ArrayView1<f64>,
    ) -> Result<Array1<f64>, CalibrationError> {
        ensure_equal_lengths(
            "uncompensated concentration",
            &[("temperature", temperature_c.len()), ("phase", phase_deg.len())],
        )?;
        Ok(Zip::from(&temperature_c)
            .and(&phase_deg)
            .map_collect(|&t, &p| self.uncompensated_concentration(t, p)))
    }

    /// Stage 2 applied elementwise.
    pub fn compensated_series(
        &self,
        raw_concentration: ArrayView1<f64>,
        pressure_bar: ArrayView1<f64>,
        temperature_c: ArrayView1<f64>,
        salinity_psu: ArrayView1<f64>,
    ) -> Result<Array1<f64>, CalibrationError> {
        ensure_equal_lengths(
            "compensated concentration",
            &[
                ("raw concentration", raw_concentration.len()),
                ("pressure", pressure_bar.len()),
                ("temperature", temperature_c.len()),
                ("salinity", salinity_psu.len()),
            ],
        )?;
        Ok(Zip::from(&raw_concentration)
            .and(&pressure_bar)
            .and(&temperature_c)
            .and(&salinity_psu)
            .map_collect(|&raw, &p, &t, &s| self.compensated_concentration(raw, p, t, s)))
    }

    /// Stage 3 applied elementwise.
    pub fn saturation_series(
        &self,
        temperature_c: ArrayView1<f64>,
        salinity_psu: ArrayView1<f64>,
        compensated_concentration_umol_l: ArrayView1<f64>,
    ) -> Result<Array1<f64>, CalibrationError> {
        ensure_equal_lengths(
            "saturation",
            &[
                ("temperature", temperature_c.len()),
                ("salinity", salinity_psu.len()),
                ("compensated concentration", compensated_concentration_umol_l.len()),
            ],
        )?;
        Ok(Zip::from(&temperature_c)
            .and(&salinity_psu)
            .and(&compensated_concentration_umol_l)
            .map_collect(|&t, &s, &o| self.saturation(t, s, o)))
    }

    /// Chains the three stages over a batch.
    pub fn derive_series(
        &self,
        temperature_c: ArrayView1<f64>,
        phase_deg: ArrayView1<f64>,
        pressure_bar: ArrayView1<f64>,
        salinity_psu: ArrayView1<f64>,
    ) -> Result<OxygenSeries, CalibrationError> {
        let raw = self.uncompensated_series(temperature_c, phase_deg)?;
        let compensated =
            self.compensated_series(raw.view(), pressure_bar, temperature_c, salinity_psu)?;
        let saturation = self.saturation_series(temperature_c, salinity_psu, compensated.view())?;
        Ok(OxygenSeries {
            raw_concentration: raw,
            compensated_concentration_umol_l: compensated,
            saturation_percent: saturation,
        })
    }
}

/// Every input must match the length of the first one.
fn ensure_equal_lengths(
    stage: &'static str,
    inputs: &[(&'static str, usize)],
) -> Result<(), CalibrationError> {
    let Some(&(reference_name, expected)) = inputs.first() else {
        return Ok(());
    };
    for &(input, found) in &inputs[1..] {
        if found != expected {
            return Err(CalibrationError::LengthMismatch {
                stage,
                reference: reference_name,
                expected,
                input,
                found,
            });
        }
    }
    Ok(())
}

/// Stage 1 with the factory calibration.
pub fn uncompensated_concentration(temperature_c: f64, phase_deg: f64) -> f64 {
    CalibrationTable::RBR_ODO.uncompensated_concentration(temperature_c, phase_deg)
}

/// Stage 2 with the factory calibration.
pub fn compensated_concentration(
    raw_concentration: f64,
    pressure_bar: f64,
    temperature_c: f64,
    salinity_psu: f64,
) -> f64 {
    CalibrationTable::RBR_ODO.compensated_concentration(
        raw_concentration,
        pressure_bar,
        temperature_c,
        salinity_psu,
    )
}

/// Stage 3 with the factory calibration.
pub fn saturation(temperature_c: f64, salinity_psu: f64, compensated_concentration_umol_l: f64) -> f64 {
    CalibrationTable::RBR_ODO.saturation(temperature_c, salinity_psu, compensated_concentration_umol_l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_relative_eq(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_phase_leaves_temperature_cubic_only() {
        let t: f64 = 20.0;
        let c = &OptodeCoefficients::RBR_ODO.c;
        let expected = c[1] * (c[4] + c[5] * t + c[6] * t * t + c[7] * t * t * t);
        assert_relative_eq(uncompensated_concentration(t, 0.0), expected);
        assert_relative_eq(expected, 6788.890246110814);
    }

    #[test]
    fn test_scaled_temperature_at_fifteen_degrees() {
        assert_relative_eq(scaled_temperature(15.0), -0.0175043853228614);
    }

    #[test]
    fn test_water_vapor_pressure() {
        assert_relative_eq(water_vapor_pressure(20.0), 0.23336536165106123);
        assert_relative_eq(water_vapor_pressure(15.0), 0.17022159712990212);
    }

    #[test]
    fn test_reference_pressure_gives_unit_pressure_factor() {
        // Zero salinity and P == Patm leave only the raw value.
        let value = compensated_concentration(123.0, STANDARD_ATMOSPHERE, 10.0, 0.0);
        assert_eq!(value, 123.0);
    }

    #[test]
    fn test_derive_matches_individual_stages() {
        let table = CalibrationTable::default();
        let sample = SensorSample {
            temperature_c: 12.5,
            pressure_bar: 25.0,
            phase_deg: 27.3,
            salinity_psu: 37.8,
        };
        let derived = table.derive(&sample);
        let raw = table.uncompensated_concentration(12.5, 27.3);
        let compensated = table.compensated_concentration(raw, 25.0, 12.5, 37.8);
        assert_eq!(derived.raw_concentration, raw);
        assert_eq!(derived.compensated_concentration_umol_l, compensated);
        assert_eq!(derived.saturation_percent, table.saturation(12.5, 37.8, compensated));
    }

    #[test]
    fn test_length_mismatch_names_stage_and_input() {
        let table = CalibrationTable::RBR_ODO;
        let t = array![10.0, 11.0, 12.0];
        let p = array![30.0, 31.0];
        let err = table.uncompensated_series(t.view(), p.view()).unwrap_err();
        assert_eq!(
            err,
            CalibrationError::LengthMismatch {
                stage: "uncompensated concentration",
                reference: "temperature",
                expected: 3,
                input: "phase",
                found: 2,
            }
        );
    }

    #[test]
    fn test_empty_series_are_accepted() {
        let empty = Array1::<f64>::zeros(0);
        let series = CalibrationTable::RBR_ODO
            .derive_series(empty.view(), empty.view(), empty.view(), empty.view())
            .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_nan_sample_does_not_contaminate_neighbours() {
        let t = array![10.0, f64::NAN, 12.0];
        let p = array![30.0, 31.0, 32.0];
        let raw = CalibrationTable::RBR_ODO.uncompensated_series(t.view(), p.view()).unwrap();
        assert!(raw[0].is_finite());
        assert!(raw[1].is_nan());
        assert!(raw[2].is_finite());
    }
}
