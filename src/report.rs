//! Spectroscopic versus photometric temperature reports

use serde::Serialize;
use std::path::Path;

use crate::{
    calibration::{compute_temperature, Estimate, Paper, Provenance, Temperatures},
    catalog::{CatalogLoader, Star},
    photometry::{ColorMode, LuminosityClass},
    Error,
};

impl Temperatures {
    /// Fixed width temperatures, absent estimates written as `0000.00`
    pub fn to_legacy_string(&self) -> String {
        self.iter()
            .map(|e| format!("{:07.2}", e.teff().unwrap_or(0.)))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// A star photometric temperature next to its spectroscopic value
#[derive(Debug, Clone)]
pub struct Comparison {
    pub id: usize,
    pub class: LuminosityClass,
    pub temperatures: Temperatures,
    pub teff_phot: Option<(f64, Provenance)>,
    /// NaN if unknown
    pub teff_spec: f64,
}
impl Comparison {
    /// Evaluates the calibrations of a catalog star
    ///
    /// Stars with `logg >= 3.5` are dwarfs and giants otherwise, including
    /// those without gravity. The Alonso estimate is reported, or the Ramirez
    /// one when Alonso does not apply. A non-positive Alonso temperature is
    /// discarded.
    pub fn new(star: &Star, mode: ColorMode) -> Self {
        let class = LuminosityClass::from_logg(star.logg);
        let temperatures = compute_temperature(&star.observation, class, mode);
        let calibrated = |e: &Estimate| e.calibrated().ok();
        let alonso = temperatures
            .iter()
            .find(|e| matches!(e.paper(), Paper::Alonso1996 | Paper::Alonso1999));
        let ramirez = temperatures.by_paper(Paper::Ramirez2005);
        let teff_phot = match alonso.map(|e| (e, calibrated(e))) {
            Some((_, Some((teff, provenance)))) => (teff > 0.).then_some((teff, provenance)),
            _ => ramirez
                .and_then(calibrated)
                .filter(|(teff, _)| *teff > 0.),
        };
        if teff_phot.is_none() {
            log::warn!("star #{}: no photometric temperature", star.id);
        }
        Self {
            id: star.id,
            class,
            temperatures,
            teff_phot,
            teff_spec: star.teff,
        }
    }
    /// Spectroscopic minus photometric temperature
    pub fn delta(&self) -> Option<f64> {
        self.teff_phot
            .map(|(teff, _)| self.teff_spec - teff)
            .filter(|d| d.is_finite())
    }
    fn record(&self) -> Record {
        let slot = |k: usize| self.temperatures.get(k).and_then(Estimate::teff);
        Record {
            id: self.id,
            class: self.class.to_string(),
            teff_spec: Some(self.teff_spec).filter(|t| t.is_finite()),
            teff_phot: self.teff_phot.map(|(t, _)| t),
            delta: self.delta(),
            source: self.teff_phot.map(|(_, p)| p.to_string()),
            slot_1: slot(0),
            slot_2: slot(1),
            slot_3: slot(2),
        }
    }
}

#[derive(Serialize)]
struct Record {
    #[serde(rename = "Star")]
    id: usize,
    #[serde(rename = "Class")]
    class: String,
    #[serde(rename = "Teff_spec [K]")]
    teff_spec: Option<f64>,
    #[serde(rename = "Teff_phot [K]")]
    teff_phot: Option<f64>,
    #[serde(rename = "Delta Teff [K]")]
    delta: Option<f64>,
    #[serde(rename = "Source")]
    source: Option<String>,
    #[serde(rename = "Teff #1 [K]")]
    slot_1: Option<f64>,
    #[serde(rename = "Teff #2 [K]")]
    slot_2: Option<f64>,
    #[serde(rename = "Teff #3 [K]")]
    slot_3: Option<f64>,
}

/// Loads a catalog and compares the photometric and spectroscopic temperatures of its stars
pub fn compare_catalog(
    loader: CatalogLoader,
    mode: ColorMode,
) -> Result<Vec<Comparison>, Error> {
    let stars = loader.load()?;
    Ok(stars
        .iter()
        .map(|star| Comparison::new(star, mode))
        .collect())
}

/// Writes the comparisons to a CSV file
pub fn to_csv<P: AsRef<Path>>(comparisons: &[Comparison], path: P) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    for comparison in comparisons {
        wtr.serialize(comparison.record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Mean and standard deviation of the temperature differences
pub fn delta_stats(comparisons: &[Comparison]) -> Option<(f64, f64)> {
    let deltas: Vec<f64> = comparisons.iter().filter_map(Comparison::delta).collect();
    if deltas.is_empty() {
        return None;
    }
    let n = deltas.len() as f64;
    let mean = deltas.iter().sum::<f64>() / n;
    let std = (deltas.iter().map(|x| x - mean).fold(0f64, |s, x| s + x * x) / n).sqrt();
    Some((mean, std))
}
