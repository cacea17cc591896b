#[cfg(feature = "plot")]
use crate::plot::PlotError;
use crate::{
    calibration::CalibrationError, catalog::CatalogError, gravity::GravityError,
    mass_age::MassAgeError, photometry::PhotometryError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `photometry` module")]
    Photometry(#[from] PhotometryError),
    #[error("Error in the `calibration` module")]
    Calibration(#[from] CalibrationError),
    #[error("Error in the `gravity` module")]
    Gravity(#[from] GravityError),
    #[error("Error in the `mass_age` module")]
    MassAge(#[from] MassAgeError),
    #[error("Error in the `catalog` module")]
    Catalog(#[from] CatalogError),
    #[error("Failed to write the CSV report")]
    Report(#[from] csv::Error),
    #[cfg(feature = "plot")]
    #[error("Error in the `plot` module")]
    Plot(#[from] PlotError),
}
