//! Surface gravity from parallax, temperature and mass
//!
//! The bolometric correction in the V band is taken from the Alonso et al.
//! (1999) giant relations, one polynomial for cool stars and one for warm
//! stars, each valid over four (log Teff, [Fe/H]) rectangles.

use std::fmt;

use crate::calibration::Interval;

#[derive(Debug, thiserror::Error)]
pub enum GravityError {
    #[error("log(Teff)={log_teff:.3} and [Fe/H]={feh:.2} are out of the bolometric correction ranges")]
    OutOfCalibrationRange { log_teff: f64, feh: f64 },
    #[error("the {polynomial:?} bolometric correction diverges at log(Teff)={log_teff:.4}")]
    Singular {
        log_teff: f64,
        polynomial: BolometricCorrection,
    },
    #[error("{name} must be finite and strictly positive, found {value}")]
    InvalidInput { name: &'static str, value: f64 },
}
type Result<T> = std::result::Result<T, GravityError>;

/// Solar bolometric magnitude
pub const MBOL_SUN: f64 = 4.77;
/// Solar surface gravity [log cgs]
pub const LOGG_SUN: f64 = 4.44;
/// Solar effective temperature [K]
pub const TEFF_SUN: f64 = 5777.;

/// Bolometric correction polynomial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BolometricCorrection {
    Cool,
    Warm,
}
struct BcPolynomial {
    kind: BolometricCorrection,
    /// `[c_inv, c0, c1, c2, c_xfeh, c_feh, c_feh2]`
    coefficients: [f64; 7],
    /// (log Teff, [Fe/H]) domains
    domains: [(Interval, Interval); 4],
}
const fn rect(log_teff: (f64, f64), feh: (f64, f64)) -> (Interval, Interval) {
    (
        Interval::closed(log_teff.0, log_teff.1),
        Interval::closed(feh.0, feh.1),
    )
}
const BC_POLYNOMIALS: [BcPolynomial; 2] = [
    BcPolynomial {
        kind: BolometricCorrection::Cool,
        coefficients: [-0.05531, -0.6177, 4.420, -2.669, 0.6943, -0.1071, -0.008612],
        domains: [
            rect((3.50, 3.67), (-0.50, 0.20)),
            rect((3.56, 3.67), (-1.50, -0.50)),
            rect((3.58, 3.67), (-2.50, -1.50)),
            rect((3.61, 3.67), (-3.00, -2.50)),
        ],
    },
    BcPolynomial {
        kind: BolometricCorrection::Warm,
        coefficients: [-0.09930, 0.02887, 2.275, -4.425, 0.3505, -0.05558, -0.005375],
        domains: [
            rect((3.65, 3.96), (-0.50, 0.20)),
            rect((3.65, 3.83), (-1.50, -0.50)),
            rect((3.65, 3.80), (-2.50, -1.50)),
            rect((3.65, 3.74), (-3.00, -2.50)),
        ],
    },
];
impl BcPolynomial {
    fn applies(&self, log_teff: f64, feh: f64) -> bool {
        self.domains
            .iter()
            .any(|(t, m)| t.contains(log_teff) && m.contains(feh))
    }
    fn eval(&self, log_teff: f64, feh: f64) -> f64 {
        let [c_inv, c0, c1, c2, c_xfeh, c_feh, c_feh2] = self.coefficients;
        let x = log_teff - 3.52;
        c_inv / x + c0 + c1 * x + c2 * x * x + c_xfeh * x * feh + c_feh * feh + c_feh2 * feh * feh
    }
}

/// V band bolometric correction and the polynomial it comes from
pub fn bolometric_correction(teff: f64, feh: f64) -> Result<(f64, BolometricCorrection)> {
    bolometric_correction_at(teff.log10(), feh)
}
fn bolometric_correction_at(log_teff: f64, feh: f64) -> Result<(f64, BolometricCorrection)> {
    let p = BC_POLYNOMIALS
        .iter()
        .find(|p| p.applies(log_teff, feh))
        .ok_or(GravityError::OutOfCalibrationRange { log_teff, feh })?;
    // the cool polynomial has a pole at log(Teff) = 3.52
    match p.eval(log_teff, feh) {
        bc if bc.is_finite() => Ok((bc, p.kind)),
        _ => Err(GravityError::Singular {
            log_teff,
            polynomial: p.kind,
        }),
    }
}

/// Interpretation of the V band extinction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtinctionScale {
    /// A_V is used as given
    #[default]
    AsIs,
    /// A_V from Schlegel et al. (1998) maps, rescaled for E(B-V) > 0.1
    /// following Bergemann et al. (2014)
    Sfd98,
}
impl ExtinctionScale {
    pub fn apply(&self, a_v: f64) -> f64 {
        match self {
            ExtinctionScale::AsIs => a_v,
            ExtinctionScale::Sfd98 => {
                let e_bv = a_v / 3.1;
                if e_bv > 0.1 {
                    3.1 * (0.035 + 0.65 * e_bv)
                } else {
                    a_v
                }
            }
        }
    }
}

/// Inputs of the surface gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityInput {
    /// V magnitude
    pub v: f64,
    /// V band extinction
    pub a_v: f64,
    /// parallax [arcsec]
    pub parallax: f64,
    /// effective temperature [K]
    pub teff: f64,
    /// mass [Msun]
    pub mass: f64,
    pub feh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggEstimate {
    pub logg: f64,
    /// the star absolute bolometric magnitude
    pub mbol: f64,
    /// the V band bolometric correction
    pub bc: f64,
    pub polynomial: BolometricCorrection,
}
impl fmt::Display for LoggEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.logg)
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(GravityError::InvalidInput { name, value })
    }
}

/// Surface gravity `logg` from the trigonometric parallax
pub fn compute_logg(input: &GravityInput, extinction: ExtinctionScale) -> Result<LoggEstimate> {
    let parallax = positive("parallax", input.parallax)?;
    let teff = positive("Teff", input.teff)?;
    let mass = positive("mass", input.mass)?;
    let feh = if input.feh.is_finite() { input.feh } else { 0. };
    let (bc, polynomial) = bolometric_correction(teff, feh)?;
    let a_v = extinction.apply(input.a_v);
    let mbol = input.v + bc + 5. * parallax.log10() + 5. - a_v;
    let logg = LOGG_SUN + mass.log10() + 4. * (teff / TEFF_SUN).log10() + 0.4 * (mbol - MBOL_SUN);
    log::debug!("BC={bc:.3} ({polynomial:?}), Mbol={mbol:.3}, logg={logg:.3}");
    Ok(LoggEstimate {
        logg,
        mbol,
        bc,
        polynomial,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn sun_at_100pc() -> GravityInput {
        GravityInput {
            v: 10.,
            a_v: 0.1,
            parallax: 0.01,
            teff: TEFF_SUN,
            mass: 1.,
            feh: 0.,
        }
    }

    #[test]
    fn solar_analog() -> std::result::Result<(), GravityError> {
        let estimate = compute_logg(&sun_at_100pc(), ExtinctionScale::AsIs)?;
        assert_eq!(estimate.polynomial, BolometricCorrection::Warm);
        assert!((estimate.bc + 0.0906).abs() < 1e-3, "{}", estimate.bc);
        let mbol = 10. + estimate.bc + 5. * 0.01f64.log10() + 5. - 0.1;
        assert!((estimate.mbol - mbol).abs() < 1e-12);
        assert!((estimate.logg - 4.4558).abs() < 1e-3, "{}", estimate.logg);
        assert_eq!(estimate.to_string(), format!("{:.3}", estimate.logg));
        Ok(())
    }

    #[test]
    fn cool_bins_take_precedence() {
        // log(Teff) = 3.66 lies in both the cool and warm solar metallicity bins
        let (_, kind) = bolometric_correction(10f64.powf(3.66), 0.).unwrap();
        assert_eq!(kind, BolometricCorrection::Cool);
        let (_, kind) = bolometric_correction(10f64.powf(3.66), -2.8).unwrap();
        assert_eq!(kind, BolometricCorrection::Cool);
        let (_, kind) = bolometric_correction(10f64.powf(3.70), -2.8).unwrap();
        assert_eq!(kind, BolometricCorrection::Warm);
    }

    #[test]
    fn out_of_range() {
        let mut input = sun_at_100pc();
        input.teff = 10000.;
        assert!(matches!(
            compute_logg(&input, ExtinctionScale::AsIs),
            Err(GravityError::OutOfCalibrationRange { .. })
        ));
        input.teff = TEFF_SUN;
        input.feh = 0.3;
        assert!(matches!(
            compute_logg(&input, ExtinctionScale::AsIs),
            Err(GravityError::OutOfCalibrationRange { .. })
        ));
        // metal-poor cool stars are only covered above log(Teff) = 3.61
        assert!(bolometric_correction(10f64.powf(3.55), -2.8).is_err());
    }

    #[test]
    fn singular_bolometric_correction() {
        assert!(matches!(
            bolometric_correction_at(3.52, 0.),
            Err(GravityError::Singular {
                polynomial: BolometricCorrection::Cool,
                ..
            })
        ));
        assert!(bolometric_correction_at(3.53, 0.).is_ok());
    }

    #[test]
    fn invalid_parallax() {
        let mut input = sun_at_100pc();
        input.parallax = 0.;
        assert!(matches!(
            compute_logg(&input, ExtinctionScale::AsIs),
            Err(GravityError::InvalidInput {
                name: "parallax",
                ..
            })
        ));
        input.parallax = 0.01;
        input.mass = -1.;
        assert!(compute_logg(&input, ExtinctionScale::AsIs).is_err());
    }

    #[test]
    fn monotonic_in_mass() {
        let mut rng = rand::thread_rng();
        let mut input = sun_at_100pc();
        for _ in 0..100 {
            input.mass = rng.gen_range(0.5..3.0);
            let logg_1 = compute_logg(&input, ExtinctionScale::AsIs).unwrap().logg;
            input.mass *= 1. + rng.gen_range(1e-3..0.5);
            let logg_2 = compute_logg(&input, ExtinctionScale::AsIs).unwrap().logg;
            assert!(logg_2 > logg_1);
        }
    }

    #[test]
    fn monotonic_in_teff() {
        let mut rng = rand::thread_rng();
        let mut input = sun_at_100pc();
        // warm polynomial, solar metallicity
        for _ in 0..100 {
            let log_teff = rng.gen_range(3.68..3.95);
            input.teff = 10f64.powf(log_teff);
            let low = compute_logg(&input, ExtinctionScale::AsIs).unwrap();
            input.teff = 10f64.powf(log_teff + 0.005);
            let high = compute_logg(&input, ExtinctionScale::AsIs).unwrap();
            assert_eq!(low.polynomial, high.polynomial);
            assert!(high.logg > low.logg);
        }
        // cool polynomial, solar metallicity
        for _ in 0..100 {
            let log_teff = rng.gen_range(3.53..3.66);
            input.teff = 10f64.powf(log_teff);
            let low = compute_logg(&input, ExtinctionScale::AsIs).unwrap();
            input.teff = 10f64.powf(log_teff + 0.005);
            let high = compute_logg(&input, ExtinctionScale::AsIs).unwrap();
            assert_eq!(low.polynomial, BolometricCorrection::Cool);
            assert_eq!(high.polynomial, BolometricCorrection::Cool);
            assert!(high.logg > low.logg);
        }
    }

    #[test]
    fn sfd98_rescaling() {
        assert_eq!(ExtinctionScale::Sfd98.apply(0.2), 0.2);
        let a_v = ExtinctionScale::Sfd98.apply(0.62);
        assert!((a_v - 3.1 * (0.035 + 0.65 * 0.2)).abs() < 1e-12);
        assert_eq!(ExtinctionScale::AsIs.apply(0.62), 0.62);

        let mut input = sun_at_100pc();
        input.a_v = 0.62;
        let as_is = compute_logg(&input, ExtinctionScale::AsIs).unwrap();
        let sfd98 = compute_logg(&input, ExtinctionScale::Sfd98).unwrap();
        // less extinction, fainter star, larger gravity
        assert!(sfd98.mbol > as_is.mbol);
        assert!(sfd98.logg > as_is.logg);
    }
}
