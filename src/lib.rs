//! Stellar effective temperature and surface gravity from photometry
//!
//! Empirical color-temperature calibrations (Alonso et al. 1996, 1999;
//! Ramirez & Melendez 2005; Casagrande et al. 2010) applied to de-reddened
//! 2MASS and Johnson colors, surface gravity from parallax and the
//! Martig et al. (2016) red giant mass and age relations.

pub mod calibration;
pub mod catalog;
mod error;
pub mod gravity;
pub mod mass_age;
pub mod photometry;
#[cfg(feature = "plot")]
pub mod plot;
pub mod report;

pub use calibration::{compute_temperature, Estimate, Paper, Provenance, Temperatures};
pub use catalog::{CatalogLoader, ExcessSample, Field, Star};
pub use error::Error;
pub use gravity::{compute_logg, ExtinctionScale, GravityInput, LoggEstimate};
pub use mass_age::{mass_age_giant, GiantParameters, MassAge};
pub use photometry::{ColorIndex, ColorMode, LuminosityClass, Observation};
pub use report::Comparison;
