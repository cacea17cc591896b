use stellar_params::{
    report::{compare_catalog, delta_stats, to_csv},
    CatalogLoader, ColorMode, Field,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "comp-teff",
    about = "Photometric versus spectroscopic temperatures of a star catalog"
)]
struct Opt {
    /// Path to the whitespace-delimited catalog
    path: String,
    /// Number of lines before the header
    #[structopt(long, default_value = "0")]
    skip_rows: usize,
    /// Metallicity column
    #[structopt(long)]
    feh_column: Option<String>,
    /// Surface gravity column
    #[structopt(long)]
    logg_column: Option<String>,
    /// Spectroscopic temperature column
    #[structopt(long)]
    teff_column: Option<String>,
    /// Reddening column
    #[structopt(long)]
    e_bv_column: Option<String>,
    /// v-ks, v-jh or b-v
    #[structopt(long, default_value = "v-ks")]
    mode: ColorMode,
    /// CSV report
    #[structopt(long, default_value = "comp_teff.csv")]
    csv: String,
    /// Comparison figure, requires the `plot` feature
    #[structopt(long)]
    plot: Option<String>,
    #[structopt(long, default_value = "3000")]
    teff_min: f64,
    #[structopt(long, default_value = "6000")]
    teff_max: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut loader = CatalogLoader::default()
        .data_path(&opt.path)
        .skip_rows(opt.skip_rows);
    for (field, column) in [
        (Field::FeH, &opt.feh_column),
        (Field::Logg, &opt.logg_column),
        (Field::Teff, &opt.teff_column),
        (Field::EBV, &opt.e_bv_column),
    ] {
        if let Some(name) = column {
            loader = loader.column(field, name.as_str());
        }
    }
    let comparisons = compare_catalog(loader, opt.mode)?;
    for c in &comparisons {
        match c.teff_phot {
            Some((teff, _)) => println!("{} --> {:.2}", c.id, teff),
            None => println!("{} --> n/a", c.id),
        }
    }
    match delta_stats(&comparisons) {
        Some((mean, std)) => println!("Teff_spec - Teff_phot: {:.1} +/- {:.1}K", mean, std),
        None => println!("No spectroscopic temperature to compare with"),
    }

    to_csv(&comparisons, &opt.csv)?;
    log::info!("Comparisons written to {}", opt.csv);

    if let Some(path) = &opt.plot {
        #[cfg(feature = "plot")]
        stellar_params::plot::teff_comparison(path, &comparisons, (opt.teff_min, opt.teff_max))?;
        #[cfg(not(feature = "plot"))]
        log::warn!(
            "{} not written: built without the `plot` feature ({}..{}K)",
            path,
            opt.teff_min,
            opt.teff_max
        );
    }

    Ok(())
}
