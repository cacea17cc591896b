//! Red giant mass and age from carbon and nitrogen abundances
//!
//! Quadratic relations in (Teff/4000, logg, [M/H], [C/M], [N/M], [(C+N)/M])
//! from Martig et al. (2016), valid inside a rectangular box only.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum MassAgeError {
    #[error("{name}={value:.3} is out of the relation range {range}")]
    OutOfCalibrationRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },
}
type Result<T> = std::result::Result<T, MassAgeError>;

/// Giant atmospheric parameters and abundances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GiantParameters {
    pub teff: f64,
    pub logg: f64,
    /// [M/H]
    pub mh: f64,
    /// [C/M]
    pub cm: f64,
    /// [N/M]
    pub nm: f64,
}
impl GiantParameters {
    /// [C/N]
    pub fn cn(&self) -> f64 {
        self.cm - self.nm
    }
    /// [(C+N)/M]
    pub fn cnm(&self) -> f64 {
        self.cm + self.nm
    }
    /// Checks the parameters against the relation box, in order
    fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64, f64, f64, &'static str); 7] = [
            ("[M/H]", self.mh, -0.8, f64::INFINITY, "(-0.8, +inf)"),
            ("Teff", self.teff, 4000., 5000., "(4000, 5000)"),
            ("logg", self.logg, 1.8, 3.3, "(1.8, 3.3)"),
            ("[C/M]", self.cm, -0.25, 0.15, "(-0.25, 0.15)"),
            ("[N/M]", self.nm, -0.1, 0.45, "(-0.1, 0.45)"),
            ("[(C+N)/M]", self.cnm(), -0.1, 0.15, "(-0.1, 0.15)"),
            ("[C/N]", self.cn(), -0.6, 0.2, "(-0.6, 0.2)"),
        ];
        match checks
            .into_iter()
            .find(|&(_, value, min, max, _)| !(value > min && value < max))
        {
            Some((name, value, _, _, range)) => {
                Err(MassAgeError::OutOfCalibrationRange { name, value, range })
            }
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassAge {
    /// [Msun]
    pub mass: f64,
    pub log_age: f64,
}
impl fmt::Display for MassAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3}", self.mass, self.log_age)
    }
}

/// Mass and logarithmic age of a red giant
pub fn mass_age_giant(p: &GiantParameters) -> Result<MassAge> {
    p.validate()?;
    let GiantParameters {
        teff,
        logg: g,
        mh,
        cm,
        nm,
    } = *p;
    let cnm = p.cnm();
    let t = teff / 4000.;

    let mass = 95.87 - 10.40 * mh - 0.73 * mh * mh + 41.36 * cm - 5.32 * cm * mh
        - 46.78 * cm * cm
        + 15.05 * nm
        - 0.93 * nm * mh
        - 30.52 * nm * cm
        - 1.61 * nm * nm
        - 67.61 * cnm
        + 7.05 * cnm * mh
        + 133.58 * cnm * cm
        + 38.94 * cnm * nm
        - 88.99 * cnm * cnm
        - 144.18 * t
        + 5.12 * t * mh
        - 73.77 * t * cm
        - 15.29 * t * nm
        + 101.75 * t * cnm
        + 27.77 * t * t
        - 9.42 * g
        + 1.52 * g * mh
        + 16.04 * g * cm
        + 1.35 * g * nm
        - 18.65 * g * cnm
        + 28.80 * g * t
        - 4.10 * g * g;

    let log_age = -54.35 + 6.53 * mh + 0.74 * mh * mh - 19.02 * cm + 4.04 * cm * mh
        + 26.90 * cm * cm
        - 12.18 * nm
        + 0.76 * nm * mh
        + 13.33 * nm * cm
        - 1.04 * nm * nm
        + 37.22 * cnm
        - 4.94 * cnm * mh
        - 77.84 * cnm * cm
        - 17.60 * cnm * nm
        + 51.24 * cnm * cnm
        + 59.58 * t
        - 1.46 * t * mh
        + 48.29 * t * cm
        + 13.99 * t * nm
        - 65.67 * t * cnm
        + 15.54 * t * t
        + 16.14 * g
        - 1.56 * g * mh
        - 13.12 * g * cm
        - 1.77 * g * nm
        + 14.24 * g * cnm
        - 34.68 * g * t
        + 4.17 * g * g;

    Ok(MassAge { mass, log_age })
}
