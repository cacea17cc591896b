//! Effective temperature from color indices
//!
//! Every calibration writes the inverse temperature as
//! `theta = a0 + a1 X + a2 X^2 + a3 X [Fe/H] + a4 [Fe/H] + a5 [Fe/H]^2`
//! with `Teff = 5040 / theta` and `X` a de-reddened color index.
//! The Ramirez & Melendez (2005) relations add a polynomial correction in `X`
//! that depends on the metallicity bin.

use std::{fmt, ops::Deref, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::photometry::{ColorIndex, ColorMode, LuminosityClass, Observation};

pub mod tables;

#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("{paper} {color} calibration does not apply to this star")]
    AbsentEstimate { paper: Paper, color: ColorIndex },
    #[error("unknown calibration {0:?}")]
    UnknownPaper(String),
    #[error("no {mode} calibration applies to this {class}")]
    OutOfCalibrationRange {
        mode: ColorMode,
        class: LuminosityClass,
    },
}
type Result<T> = std::result::Result<T, CalibrationError>;

/// `theta_eff` to `Teff` conversion constant [K]
pub const THETA_TEFF: f64 = 5040.;

/// Published source of a calibration
#[derive(EnumIter, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Paper {
    Alonso1996,
    Alonso1999,
    Ramirez2005,
    Casagrande2010,
}
impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Paper::*;
        match self {
            Alonso1996 => write!(f, "alonso1996"),
            Alonso1999 => write!(f, "alonso1999"),
            Ramirez2005 => write!(f, "ramirez2005"),
            Casagrande2010 => write!(f, "casagrande2010"),
        }
    }
}
impl FromStr for Paper {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Paper::iter()
            .find(|paper| paper.to_string() == name)
            .ok_or_else(|| CalibrationError::UnknownPaper(s.to_string()))
    }
}

/// Interval with inclusive upper bound and an inclusive or exclusive lower bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
    pub min_exclusive: bool,
}
impl Interval {
    /// The whole real line
    pub const ANY: Interval = Interval::closed(f64::NEG_INFINITY, f64::INFINITY);
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: false,
        }
    }
    pub const fn left_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
        }
    }
    /// Returns `false` for NaN
    pub fn contains(&self, value: f64) -> bool {
        let above = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        above && value <= self.max
    }
}

/// A single `theta` relation and the domain where it applies
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub label: &'static str,
    pub color: Interval,
    pub feh: Interval,
    pub theta: [f64; 6],
}
impl Relation {
    pub fn applies(&self, color: f64, feh: f64) -> bool {
        self.color.contains(color) && self.feh.contains(feh)
    }
}

/// Ramirez & Melendez (2005) metallicity bin with its polynomial correction
#[derive(Debug, Clone, Copy)]
pub struct Bin {
    pub label: &'static str,
    pub color: Interval,
    pub feh: Interval,
    pub correction: [f64; 7],
}
impl Bin {
    pub fn applies(&self, color: f64, feh: f64) -> bool {
        self.color.contains(color) && self.feh.contains(feh)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Scheme {
    /// First relation whose domain contains the star
    Piecewise(&'static [Relation]),
    /// A single relation corrected according to the first matching bin
    Corrected {
        theta: [f64; 6],
        bins: &'static [Bin],
    },
}

/// Where an estimate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provenance {
    pub paper: Paper,
    pub color: ColorIndex,
    /// Equation or metallicity bin of the calibration
    pub relation: &'static str,
}
impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.paper, self.color, self.relation)
    }
}

/// Outcome of a single calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    Calibrated { teff: f64, provenance: Provenance },
    Absent { paper: Paper, color: ColorIndex },
}
impl Estimate {
    pub fn teff(&self) -> Option<f64> {
        match self {
            Estimate::Calibrated { teff, .. } => Some(*teff),
            Estimate::Absent { .. } => None,
        }
    }
    pub fn provenance(&self) -> Option<&Provenance> {
        match self {
            Estimate::Calibrated { provenance, .. } => Some(provenance),
            Estimate::Absent { .. } => None,
        }
    }
    pub fn is_absent(&self) -> bool {
        matches!(self, Estimate::Absent { .. })
    }
    pub fn paper(&self) -> Paper {
        match self {
            Estimate::Calibrated { provenance, .. } => provenance.paper,
            Estimate::Absent { paper, .. } => *paper,
        }
    }
    pub fn color(&self) -> ColorIndex {
        match self {
            Estimate::Calibrated { provenance, .. } => provenance.color,
            Estimate::Absent { color, .. } => *color,
        }
    }
    /// The temperature and its provenance or [CalibrationError::AbsentEstimate]
    pub fn calibrated(&self) -> Result<(f64, Provenance)> {
        match *self {
            Estimate::Calibrated { teff, provenance } => Ok((teff, provenance)),
            Estimate::Absent { paper, color } => {
                Err(CalibrationError::AbsentEstimate { paper, color })
            }
        }
    }
}
impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Calibrated { teff, provenance } => {
                write!(f, "{:<32}: {:.0}K", provenance.to_string(), teff)
            }
            Estimate::Absent { paper, color } => {
                write!(f, "{:<32}: out of range", format!("{} {}", paper, color))
            }
        }
    }
}

/// Effective temperature from a `theta` relation
pub fn formula_teff(theta: &[f64; 6], color: f64, feh: f64) -> f64 {
    let [a0, a1, a2, a3, a4, a5] = *theta;
    let theta_eff =
        a0 + a1 * color + a2 * color * color + a3 * color * feh + a4 * feh + a5 * feh * feh;
    THETA_TEFF / theta_eff
}

/// Inverse of [formula_teff]: the `theta_eff` value of a temperature
pub fn theta_from_teff(teff: f64) -> f64 {
    THETA_TEFF / teff
}

/// Ramirez & Melendez (2005) polynomial temperature correction [K]
pub fn ramirez_correction(p: &[f64; 7], color: f64) -> f64 {
    p.iter().rev().fold(0f64, |acc, &pk| acc * color + pk)
}

/// A published color-temperature calibration
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    pub paper: Paper,
    pub color: ColorIndex,
    pub scheme: Scheme,
}
impl Calibration {
    /// Evaluates the calibration for a de-reddened color and a metallicity
    pub fn evaluate(&self, color: f64, feh: f64) -> Estimate {
        let matched = match self.scheme {
            Scheme::Piecewise(relations) => relations
                .iter()
                .find(|r| r.applies(color, feh))
                .map(|r| (formula_teff(&r.theta, color, feh), r.label)),
            Scheme::Corrected { theta, bins } => {
                let teff = formula_teff(&theta, color, feh);
                bins.iter()
                    .find(|b| b.applies(color, feh))
                    .map(|b| (teff + ramirez_correction(&b.correction, color), b.label))
            }
        };
        match matched {
            Some((teff, relation)) => {
                let provenance = Provenance {
                    paper: self.paper,
                    color: self.color,
                    relation,
                };
                log::debug!("{provenance}: {teff:.0}K");
                Estimate::Calibrated { teff, provenance }
            }
            None => {
                log::debug!(
                    "out of {} {} range ({}={:.3}, [Fe/H]={:.2})",
                    self.paper,
                    self.color,
                    self.color,
                    color,
                    feh
                );
                Estimate::Absent {
                    paper: self.paper,
                    color: self.color,
                }
            }
        }
    }
}

/// Ordered temperature estimates, one per calibration of a color mode
#[derive(Debug, Clone, PartialEq)]
pub struct Temperatures {
    pub class: LuminosityClass,
    pub mode: ColorMode,
    estimates: Vec<Estimate>,
}
impl Deref for Temperatures {
    type Target = [Estimate];

    fn deref(&self) -> &Self::Target {
        &self.estimates
    }
}
impl Temperatures {
    /// The first estimate from a given paper
    pub fn by_paper(&self, paper: Paper) -> Option<&Estimate> {
        self.iter().find(|e| e.paper() == paper)
    }
    /// The estimate from a given color index
    pub fn by_color(&self, color: ColorIndex) -> Option<&Estimate> {
        self.iter().find(|e| e.color() == color)
    }
    /// Iterator over the calibrated temperatures
    pub fn calibrated(&self) -> impl Iterator<Item = (f64, &Provenance)> + '_ {
        self.iter()
            .filter_map(|e| e.teff().zip(e.provenance()))
    }
    /// The first calibrated estimate in calibration order
    pub fn preferred(&self) -> Result<(f64, Provenance)> {
        self.iter()
            .find_map(|e| e.calibrated().ok())
            .ok_or(CalibrationError::OutOfCalibrationRange {
                mode: self.mode,
                class: self.class,
            })
    }
}
impl fmt::Display for Temperatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} Teff:", self.class, self.mode)?;
        for e in self.iter() {
            writeln!(f, " - {}", e)?;
        }
        Ok(())
    }
}

/// Effective temperature estimates of a star for a color mode
///
/// The estimates follow the order of [tables::calibrations]; calibrations
/// that do not cover the star color or metallicity are [Estimate::Absent].
pub fn compute_temperature(
    observation: &Observation,
    class: LuminosityClass,
    mode: ColorMode,
) -> Temperatures {
    let feh = observation.metallicity();
    let colors = observation.dereddened(class);
    let estimates: Vec<_> = tables::calibrations(class, mode)
        .iter()
        .map(|calibration| calibration.evaluate(colors.get(calibration.color), feh))
        .collect();
    if estimates.iter().all(Estimate::is_absent) {
        log::warn!("no {mode} calibration applies to {observation:?} ({class})");
    }
    Temperatures {
        class,
        mode,
        estimates,
    }
}

#[cfg(test)]
mod tests {
    use super::{tables::*, *};

    fn scenario() -> Observation {
        Observation {
            j: 8.5,
            h: 8.2,
            ks: 8.0,
            b: 10.8,
            v: 10.0,
            e_bv: 0.05,
            feh: 0.0,
        }
    }

    #[test]
    fn dwarf_vks_scenario() {
        let teffs = compute_temperature(&scenario(), LuminosityClass::Dwarf, ColorMode::VKs);
        assert_eq!(teffs.len(), 3);
        let papers: Vec<_> = teffs.iter().map(|e| e.paper()).collect();
        assert_eq!(
            papers,
            vec![Paper::Alonso1996, Paper::Ramirez2005, Paper::Casagrande2010]
        );
        for e in teffs.iter() {
            let teff = e.teff().expect("calibrated");
            assert!((4000f64..7000f64).contains(&teff), "{e}");
        }
        // (V-K)_TCS,0 = 1.86 falls in the red branch of Alonso et al. (1996)
        assert_eq!(
            teffs.by_paper(Paper::Alonso1996).unwrap().provenance().unwrap().relation,
            "eq.8"
        );
        let (teff, provenance) = teffs.preferred().unwrap();
        assert_eq!(provenance.paper, Paper::Alonso1996);
        assert!((teff - 5254.).abs() < 1.);
    }

    #[test]
    fn slots_per_mode_and_class() {
        let obs = scenario();
        for class in LuminosityClass::iter() {
            for mode in ColorMode::iter() {
                let n = compute_temperature(&obs, class, mode).len();
                let expected = match (class, mode) {
                    (LuminosityClass::Dwarf, ColorMode::VKs | ColorMode::BV) => 3,
                    _ => 2,
                };
                assert_eq!(n, expected, "{class} {mode}");
            }
        }
    }

    #[test]
    fn extreme_metallicity_drops_ramirez_and_casagrande() {
        let mut obs = scenario();
        obs.feh = -10.;
        for class in LuminosityClass::iter() {
            for mode in ColorMode::iter() {
                let teffs = compute_temperature(&obs, class, mode);
                teffs
                    .iter()
                    .filter(|e| matches!(e.paper(), Paper::Ramirez2005 | Paper::Casagrande2010))
                    .for_each(|e| assert!(e.is_absent(), "{class} {mode}: {e}"));
            }
        }
        // Alonso et al. (1999) giant relations are not gated by metallicity
        let teffs = compute_temperature(&obs, LuminosityClass::Giant, ColorMode::VKs);
        assert!(!teffs.by_paper(Paper::Alonso1999).unwrap().is_absent());
        // neither are the Alonso et al. (1996) dwarf relations
        let teffs = compute_temperature(&obs, LuminosityClass::Dwarf, ColorMode::VKs);
        assert!(!teffs.by_paper(Paper::Alonso1996).unwrap().is_absent());
    }

    #[test]
    fn all_absent_is_out_of_range() {
        let mut obs = scenario();
        obs.feh = -10.;
        let teffs = compute_temperature(&obs, LuminosityClass::Dwarf, ColorMode::VJH);
        assert!(teffs.iter().all(Estimate::is_absent));
        assert!(matches!(
            teffs.preferred(),
            Err(CalibrationError::OutOfCalibrationRange { .. })
        ));
        assert!(matches!(
            teffs[0].calibrated(),
            Err(CalibrationError::AbsentEstimate {
                paper: Paper::Ramirez2005,
                color: ColorIndex::VJ
            })
        ));
    }

    #[test]
    fn ramirez_window_edges_are_inclusive() {
        for x in [0.896, 3.360] {
            let e = RAMIREZ_DWARF_VKS.evaluate(x, 0.);
            assert_eq!(e.provenance().unwrap().relation, "[Fe/H] -0.5..+0.5");
        }
        assert!(RAMIREZ_DWARF_VKS.evaluate(0.8959, 0.).is_absent());
        assert!(RAMIREZ_DWARF_VKS.evaluate(3.3601, 0.).is_absent());
        // the shared [Fe/H] = -0.5 edge belongs to the metal-rich bin
        let e = RAMIREZ_GIANT_VJ.evaluate(1.5, -0.5);
        assert_eq!(e.provenance().unwrap().relation, "[Fe/H] -0.5..+0.5");
        let e = RAMIREZ_GIANT_VJ.evaluate(1.1, -0.5);
        assert_eq!(e.provenance().unwrap().relation, "[Fe/H] -1.5..-0.5");
        for feh in [-4.0, -2.5] {
            let e = RAMIREZ_GIANT_VKS.evaluate(2.0, feh);
            assert!(!e.is_absent());
        }
        assert!(RAMIREZ_GIANT_VKS.evaluate(2.0, -4.0001).is_absent());
    }

    #[test]
    fn ramirez_giant_bv_uses_each_bin_correction() {
        let (x, feh) = (1.0, -2.0);
        let base = formula_teff(&[0.5737, 0.4882, -0.0149, 0.0563, -0.1160, -0.0114], x, feh);
        let teff = RAMIREZ_GIANT_BV.evaluate(x, feh).teff().unwrap();
        let correction = 606.032 - 1248.79 * x + 627.453 * x * x;
        assert!((teff - base - correction).abs() < 1e-9);
        // lower edge of the [-2.5,-1.5] bin
        assert!(!RAMIREZ_GIANT_BV.evaluate(0.605, feh).is_absent());
        assert!(RAMIREZ_GIANT_BV.evaluate(0.6049, feh).is_absent());
    }

    #[test]
    fn alonso_branch_edges() {
        let label = |x: f64| {
            ALONSO96_DWARF_VK
                .evaluate(x, 0.)
                .provenance()
                .map(|p| p.relation)
        };
        assert_eq!(label(0.40), Some("eq.7"));
        assert_eq!(label(1.60), Some("eq.7"));
        assert_eq!(label(1.6001), Some("eq.8"));
        assert_eq!(label(2.20), Some("eq.8"));
        assert_eq!(label(2.2001), None);
        assert_eq!(label(0.3999), None);

        let label = |x: f64| ALONSO99_GIANT_VK.evaluate(x, 0.).provenance().unwrap().relation;
        assert_eq!(label(0.20), "eq.8");
        assert_eq!(label(2.50), "eq.8");
        assert_eq!(label(2.5001), "eq.9");
        assert_eq!(label(0.1999), "eq.9");

        let label = |x: f64| ALONSO99_GIANT_BV.evaluate(x, 0.).provenance().unwrap().relation;
        assert_eq!(label(0.20), "eq.3");
        assert_eq!(label(0.80), "eq.3");
        assert_eq!(label(0.8001), "eq.4");
    }

    #[test]
    fn casagrande_edges() {
        assert!(!CASAGRANDE_DWARF_VKS.evaluate(0.78, 0.40).is_absent());
        assert!(!CASAGRANDE_DWARF_VKS.evaluate(3.15, -5.0).is_absent());
        assert!(CASAGRANDE_DWARF_VKS.evaluate(3.15, 0.41).is_absent());
        assert!(!CASAGRANDE_DWARF_BV.evaluate(0.18, 0.).is_absent());
        assert!(!CASAGRANDE_DWARF_BV.evaluate(1.29, 0.).is_absent());
        assert!(CASAGRANDE_DWARF_BV.evaluate(1.2901, 0.).is_absent());
    }

    #[test]
    fn nan_color_is_absent() {
        assert!(ALONSO99_GIANT_VK.evaluate(f64::NAN, 0.).is_absent());
        assert!(RAMIREZ_GIANT_VKS.evaluate(f64::NAN, 0.).is_absent());
    }

    #[test]
    fn paper_names() {
        for paper in Paper::iter() {
            assert_eq!(paper.to_string().parse::<Paper>().unwrap(), paper);
        }
        assert_eq!(" Ramirez2005".parse::<Paper>().unwrap(), Paper::Ramirez2005);
        assert!(matches!(
            "alonso2000".parse::<Paper>(),
            Err(CalibrationError::UnknownPaper(_))
        ));
    }

    #[test]
    fn theta_round_trip() {
        let theta = [0.4942, 0.2809, -0.0180, -0.0294, 0.0444, -0.0008];
        for (x, feh) in [(1.2, 0.1), (2.0, -1.0), (2.9, -2.7)] {
            let teff = formula_teff(&theta, x, feh);
            let expected = theta[0]
                + theta[1] * x
                + theta[2] * x * x
                + theta[3] * x * feh
                + theta[4] * feh
                + theta[5] * feh * feh;
            assert!((theta_from_teff(teff) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn correction_polynomial() {
        let p = [1., 2., 3., 0., 0., 0., 0.5];
        let x: f64 = 1.5;
        let expected = 1. + 2. * x + 3. * x * x + 0.5 * x.powi(6);
        assert!((ramirez_correction(&p, x) - expected).abs() < 1e-12);
        assert_eq!(ramirez_correction(&[-10.3848, 0., 0., 0., 0., 0., 0.], 7.), -10.3848);
    }
}
