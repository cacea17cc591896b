//! Whitespace-delimited star catalogs
//!
//! The first line after the skipped preamble is the header; cells that are
//! not numbers are read as NaN.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::photometry::Observation;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read the catalog file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse the catalog table")]
    Csv(#[from] csv::Error),
    #[error("column {0:?} is missing from the catalog header")]
    MissingColumn(String),
    #[error("catalog row {row} has {found} columns, expected at least {expected}")]
    ShortRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("excess star index {index} is out of the {len} catalog rows")]
    ExcessIndex { index: usize, len: usize },
}
type Result<T> = std::result::Result<T, CatalogError>;

/// Reads a numeric cell, anything else is NaN
pub fn to_numeric(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Rewrites a whitespace-delimited table as CSV, dropping the first `skip_rows` lines
fn whitespace_to_csv(contents: &str, skip_rows: usize) -> String {
    contents
        .lines()
        .skip(skip_rows)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Catalog quantities read from named columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    J,
    H,
    Ks,
    B,
    V,
    EBV,
    FeH,
    Logg,
    Teff,
}
impl Field {
    const REQUIRED: [Field; 6] = [Field::J, Field::H, Field::Ks, Field::B, Field::V, Field::EBV];
    const OPTIONAL: [Field; 3] = [Field::FeH, Field::Logg, Field::Teff];
    fn default_column(&self) -> &'static str {
        use Field::*;
        match self {
            J => "Jmag",
            H => "Hmag",
            Ks => "Kmag",
            B => "Bmag",
            V => "Vmag",
            EBV => "E_BV",
            FeH => "FeH",
            Logg => "logg",
            Teff => "Teff",
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// row index in the catalog
    pub id: usize,
    pub observation: Observation,
    /// spectroscopic gravity, NaN if unknown
    pub logg: f64,
    /// spectroscopic effective temperature, NaN if unknown
    pub teff: f64,
}

/// Star catalog loader
pub struct CatalogLoader {
    path: PathBuf,
    skip_rows: usize,
    columns: HashMap<Field, String>,
}
impl Default for CatalogLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalog.dat"),
            skip_rows: 0,
            columns: HashMap::new(),
        }
    }
}
impl CatalogLoader {
    pub fn data_path<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..self
        }
    }
    /// Number of lines before the header
    pub fn skip_rows(self, skip_rows: usize) -> Self {
        Self { skip_rows, ..self }
    }
    /// Renames the column a field is read from
    pub fn column<S: Into<String>>(mut self, field: Field, name: S) -> Self {
        self.columns.insert(field, name.into());
        self
    }
    fn column_name(&self, field: Field) -> &str {
        self.columns
            .get(&field)
            .map(|s| s.as_str())
            .unwrap_or_else(|| field.default_column())
    }
    pub fn load(self) -> Result<Vec<Star>> {
        log::info!("Loading {:?}...", self.path);
        let contents = fs::read_to_string(&self.path)?;
        let stars = self.parse(&contents)?;
        log::info!("{} stars loaded", stars.len());
        Ok(stars)
    }
    /// Parses the catalog from the table text
    pub fn parse(&self, contents: &str) -> Result<Vec<Star>> {
        let table = whitespace_to_csv(contents, self.skip_rows);
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(table.as_bytes());
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let position = |field: Field| {
            let name = self.column_name(field);
            headers.iter().position(|h| h == name)
        };
        let mut index = HashMap::new();
        for field in Field::REQUIRED {
            let k = position(field)
                .ok_or_else(|| CatalogError::MissingColumn(self.column_name(field).to_string()))?;
            index.insert(field, k);
        }
        for field in Field::OPTIONAL {
            match position(field) {
                Some(k) => {
                    index.insert(field, k);
                }
                None => log::warn!(
                    "column {:?} not found, {:?} set to NaN",
                    self.column_name(field),
                    field
                ),
            }
        }
        // trailing optional cells may be missing and read as NaN
        let n_min = Field::REQUIRED
            .iter()
            .filter_map(|field| index.get(field))
            .max()
            .map_or(0, |k| k + 1);

        let mut stars = vec![];
        for (id, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() < n_min {
                return Err(CatalogError::ShortRow {
                    row: id,
                    found: record.len(),
                    expected: n_min,
                });
            }
            let value = |field: Field| {
                index
                    .get(&field)
                    .and_then(|&k| record.get(k))
                    .map_or(f64::NAN, to_numeric)
            };
            stars.push(Star {
                id,
                observation: Observation {
                    j: value(Field::J),
                    h: value(Field::H),
                    ks: value(Field::Ks),
                    b: value(Field::B),
                    v: value(Field::V),
                    e_bv: value(Field::EBV),
                    feh: value(Field::FeH),
                },
                logg: value(Field::Logg),
                teff: value(Field::Teff),
            });
        }
        Ok(stars)
    }
}

/// WISE [3.4]-[22] color and lithium abundance with the IR excess flags
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExcessSample {
    pub photometry: Vec<f64>,
    pub ali: Vec<f64>,
    pub excess: Vec<bool>,
}
impl ExcessSample {
    /// Loads the first two columns of a headerless table
    pub fn load<P: AsRef<Path>>(path: P, skip_rows: usize, excess: &[usize]) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, skip_rows, excess)
    }
    pub fn parse(contents: &str, skip_rows: usize, excess: &[usize]) -> Result<Self> {
        let table = whitespace_to_csv(contents, skip_rows);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(table.as_bytes());
        let mut this = Self::default();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() < 2 {
                return Err(CatalogError::ShortRow {
                    row,
                    found: record.len(),
                    expected: 2,
                });
            }
            this.photometry.push(to_numeric(&record[0]));
            this.ali.push(to_numeric(&record[1]));
        }
        let len = this.photometry.len();
        this.excess = vec![false; len];
        for &index in excess {
            *this
                .excess
                .get_mut(index)
                .ok_or(CatalogError::ExcessIndex { index, len })? = true;
        }
        Ok(this)
    }
    pub fn len(&self) -> usize {
        self.photometry.len()
    }
    pub fn is_empty(&self) -> bool {
        self.photometry.is_empty()
    }
    /// Iterator over the (color, A(Li)) pairs with or without IR excess
    pub fn points(&self, excess: bool) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.photometry
            .iter()
            .zip(self.ali.iter())
            .zip(self.excess.iter())
            .filter(move |(_, &e)| e == excess)
            .map(|((&x, &y), _)| (x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
# Kepler targets
# photometry from 2MASS and APASS
#
#
  KIC       Jmag   Hmag   Kmag   Bmag    Vmag   E_BV   FeH2   logg2  Teff2
  1027707   8.50   8.20   8.00   10.80  10.00  0.05   0.10   4.40   5300
  1160789   9.10   8.55   8.42   12.10  11.00  0.02   --     2.45   4650
  1433730   9.60   9.10   9.00   11.20  10.60  0.01   -0.30  nan    abc
";

    #[test]
    fn parse_catalog() -> Result<()> {
        let stars = CatalogLoader::default()
            .skip_rows(4)
            .column(Field::FeH, "FeH2")
            .column(Field::Logg, "logg2")
            .column(Field::Teff, "Teff2")
            .parse(CATALOG)?;
        assert_eq!(stars.len(), 3);
        assert_eq!(stars[0].observation.ks, 8.0);
        assert_eq!(stars[0].observation.e_bv, 0.05);
        assert_eq!(stars[0].teff, 5300.);
        assert!(stars[1].observation.feh.is_nan());
        assert_eq!(stars[1].observation.metallicity(), 0.);
        assert!(stars[2].logg.is_nan());
        assert!(stars[2].teff.is_nan());
        assert_eq!(stars[2].id, 2);
        Ok(())
    }

    #[test]
    fn missing_optional_columns_are_nan() -> Result<()> {
        let stars = CatalogLoader::default().skip_rows(4).parse(CATALOG)?;
        assert!(stars.iter().all(|s| s.logg.is_nan() && s.teff.is_nan()));
        Ok(())
    }

    #[test]
    fn short_rows_miss_optional_cells() -> Result<()> {
        let table = "\
Jmag Hmag Kmag Bmag Vmag E_BV FeH logg Teff
8.50 8.20 8.00 10.80 10.00 0.05 0.10 4.40 5300
9.10 8.55 8.42 12.10 11.00 0.02 -0.20 2.45
";
        let stars = CatalogLoader::default().parse(table)?;
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[1].observation.feh, -0.2);
        assert_eq!(stars[1].logg, 2.45);
        assert!(stars[1].teff.is_nan());
        // a row missing a photometric cell is still rejected
        let table = "Jmag Hmag Kmag Bmag Vmag E_BV\n8.50 8.20 8.00 10.80 10.00\n";
        assert!(matches!(
            CatalogLoader::default().parse(table),
            Err(CatalogError::ShortRow {
                row: 0,
                found: 5,
                expected: 6
            })
        ));
        Ok(())
    }

    #[test]
    fn missing_required_column() {
        let err = CatalogLoader::default()
            .skip_rows(4)
            .column(Field::EBV, "E_BV_SF")
            .parse(CATALOG)
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(name) if name == "E_BV_SF"));
    }

    #[test]
    fn excess_sample() -> Result<()> {
        let table = "photometry ALi\n0.1 1.2\n2.5 3.1\n-0.3 0.9\n4.0 2.2\n";
        let sample = ExcessSample::parse(table, 1, &[1, 3])?;
        assert_eq!(sample.len(), 4);
        let excess: Vec<_> = sample.points(true).collect();
        assert_eq!(excess, vec![(2.5, 3.1), (4.0, 2.2)]);
        assert_eq!(sample.points(false).count(), 2);
        assert!(matches!(
            ExcessSample::parse(table, 1, &[4]),
            Err(CatalogError::ExcessIndex { index: 4, len: 4 })
        ));
        Ok(())
    }
}
