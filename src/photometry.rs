//! Photometric observations and interstellar de-reddening
//!
//! Magnitudes are in the 2MASS system for J, H and Ks and in the Johnson
//! system for B and V. Reddening coefficients follow Ramirez & Melendez (2005).

use std::{fmt, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Debug, thiserror::Error)]
pub enum PhotometryError {
    #[error(r#"luminosity class {0:?} is not recognized, expected "dwarf" or "giant""#)]
    LuminosityClass(String),
    #[error(r#"color mode {0:?} is not recognized, expected "v-ks", "v-jh" or "b-v" (or 0, 1, 2)"#)]
    InvalidMode(String),
}
type Result<T> = std::result::Result<T, PhotometryError>;

/// E(V-J)/E(B-V)
pub const R_VJ: f64 = 2.16;
/// E(V-H)/E(B-V)
pub const R_VH: f64 = 2.51;
/// E(V-Ks)/E(B-V), 2MASS Ks
pub const R_VKS: f64 = 2.70;
/// E(V-K)/E(B-V), TCS K
pub const R_VK_TCS: f64 = 2.74;
/// Catalog placeholder for a missing metallicity
pub const FEH_SENTINEL: f64 = 99.0;

/// Stellar luminosity class
#[derive(EnumIter, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LuminosityClass {
    Dwarf,
    Giant,
}
impl LuminosityClass {
    /// Dwarf above `logg >= 3.5`, giant below or when the gravity is unknown
    pub fn from_logg(logg: f64) -> Self {
        if logg.is_finite() && logg >= 3.5 {
            LuminosityClass::Dwarf
        } else {
            LuminosityClass::Giant
        }
    }
    /// The 2MASS Ks to TCS K color term
    fn tcs_color_term(&self) -> f64 {
        match self {
            LuminosityClass::Dwarf => 0.034,
            LuminosityClass::Giant => 0.027,
        }
    }
}
impl FromStr for LuminosityClass {
    type Err = PhotometryError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        LuminosityClass::iter()
            .find(|class| class.to_string() == name)
            .ok_or_else(|| PhotometryError::LuminosityClass(s.to_string()))
    }
}
impl fmt::Display for LuminosityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuminosityClass::Dwarf => write!(f, "dwarf"),
            LuminosityClass::Giant => write!(f, "giant"),
        }
    }
}

/// Color index fed to a calibration
#[derive(EnumIter, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorIndex {
    /// V-Ks with Ks from 2MASS
    VKs,
    /// V-K with K converted to the TCS system
    VKTcs,
    VJ,
    VH,
    BV,
}
impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ColorIndex::*;
        match self {
            VKs => write!(f, "V-Ks"),
            VKTcs => write!(f, "V-K(TCS)"),
            VJ => write!(f, "V-J"),
            VH => write!(f, "V-H"),
            BV => write!(f, "B-V"),
        }
    }
}

/// Selection of the color indices used for the temperature calibrations
#[derive(EnumIter, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    VKs,
    VJH,
    BV,
}
impl TryFrom<u8> for ColorMode {
    type Error = PhotometryError;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(ColorMode::VKs),
            1 => Ok(ColorMode::VJH),
            2 => Ok(ColorMode::BV),
            _ => Err(PhotometryError::InvalidMode(mode.to_string())),
        }
    }
}
impl FromStr for ColorMode {
    type Err = PhotometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "v-ks" | "v-k" | "vks" => Ok(ColorMode::VKs),
            "1" | "v-jh" | "v-j,v-h" | "vjh" => Ok(ColorMode::VJH),
            "2" | "b-v" | "bv" => Ok(ColorMode::BV),
            _ => Err(PhotometryError::InvalidMode(s.to_string())),
        }
    }
}
impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::VKs => write!(f, "V-Ks"),
            ColorMode::VJH => write!(f, "V-J & V-H"),
            ColorMode::BV => write!(f, "B-V"),
        }
    }
}

/// A star photometry, reddening and metallicity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub j: f64,
    pub h: f64,
    pub ks: f64,
    pub b: f64,
    pub v: f64,
    pub e_bv: f64,
    pub feh: f64,
}
impl Observation {
    /// Metallicity with missing values (non finite or catalog sentinel) set to solar
    pub fn metallicity(&self) -> f64 {
        if !self.feh.is_finite() || self.feh == FEH_SENTINEL {
            0f64
        } else {
            self.feh
        }
    }
    /// 2MASS Ks converted to the TCS K system
    pub fn k_tcs(&self, class: LuminosityClass) -> f64 {
        self.ks - 0.014 + class.tcs_color_term() * (self.j - self.ks)
    }
    /// Intrinsic color indices for the given luminosity class
    pub fn dereddened(&self, class: LuminosityClass) -> DereddenedColors {
        let e_bv = self.e_bv;
        DereddenedColors {
            bv: self.b - self.v - e_bv,
            vj: self.v - self.j - R_VJ * e_bv,
            vh: self.v - self.h - R_VH * e_bv,
            vks: self.v - self.ks - R_VKS * e_bv,
            vk_tcs: self.v - self.k_tcs(class) - R_VK_TCS * e_bv,
        }
    }
}

/// Color indices corrected for interstellar reddening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DereddenedColors {
    pub bv: f64,
    pub vj: f64,
    pub vh: f64,
    pub vks: f64,
    pub vk_tcs: f64,
}
impl DereddenedColors {
    pub fn get(&self, color: ColorIndex) -> f64 {
        use ColorIndex::*;
        match color {
            VKs => self.vks,
            VKTcs => self.vk_tcs,
            VJ => self.vj,
            VH => self.vh,
            BV => self.bv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(e_bv: f64) -> Observation {
        Observation {
            j: 8.5,
            h: 8.2,
            ks: 8.0,
            b: 10.8,
            v: 10.0,
            e_bv,
            feh: 0.0,
        }
    }

    #[test]
    fn no_reddening_keeps_raw_colors() {
        let obs = star(0.0);
        let c = obs.dereddened(LuminosityClass::Dwarf);
        assert_eq!(c.bv, obs.b - obs.v);
        assert_eq!(c.vj, obs.v - obs.j);
        assert_eq!(c.vh, obs.v - obs.h);
        assert_eq!(c.vks, obs.v - obs.ks);
    }

    #[test]
    fn reddening_is_linear() {
        for class in LuminosityClass::iter() {
            let c0 = star(0.0).dereddened(class);
            let c1 = star(0.1).dereddened(class);
            let c2 = star(0.2).dereddened(class);
            for color in ColorIndex::iter() {
                let d1 = c0.get(color) - c1.get(color);
                let d2 = c0.get(color) - c2.get(color);
                assert!((2. * d1 - d2).abs() < 1e-12, "{color}");
            }
            assert!((c0.vks - c1.vks - 0.1 * R_VKS).abs() < 1e-12);
            assert!((c0.bv - c1.bv - 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn tcs_conversion_depends_on_class() {
        let obs = star(0.0);
        assert!((obs.k_tcs(LuminosityClass::Dwarf) - 8.003).abs() < 1e-12);
        assert!((obs.k_tcs(LuminosityClass::Giant) - 7.9995).abs() < 1e-12);
    }

    #[test]
    fn missing_metallicity_is_solar() {
        let mut obs = star(0.0);
        obs.feh = f64::NAN;
        assert_eq!(obs.metallicity(), 0.0);
        obs.feh = FEH_SENTINEL;
        assert_eq!(obs.metallicity(), 0.0);
        obs.feh = -1.2;
        assert_eq!(obs.metallicity(), -1.2);
    }

    #[test]
    fn parse_modes_and_classes() {
        assert_eq!(ColorMode::try_from(2).unwrap(), ColorMode::BV);
        assert!(matches!(
            ColorMode::try_from(3),
            Err(PhotometryError::InvalidMode(_))
        ));
        assert_eq!("V-Ks".parse::<ColorMode>().unwrap(), ColorMode::VKs);
        assert!("U-B".parse::<ColorMode>().is_err());
        assert_eq!(
            "Giant".parse::<LuminosityClass>().unwrap(),
            LuminosityClass::Giant
        );
        assert!("subgiant".parse::<LuminosityClass>().is_err());
        assert_eq!(LuminosityClass::from_logg(4.4), LuminosityClass::Dwarf);
        assert_eq!(LuminosityClass::from_logg(f64::NAN), LuminosityClass::Giant);
    }
}
