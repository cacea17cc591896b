use stellar_params::{
    compute_logg, compute_temperature, mass_age_giant, ColorMode, ExtinctionScale,
    GiantParameters, GravityInput, LuminosityClass, Observation,
};
use structopt::{clap::AppSettings, StructOpt};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "stellar-params",
    about = "Stellar parameters from photometry",
    global_settings = &[AppSettings::AllowNegativeNumbers]
)]
enum Opt {
    /// Effective temperatures from the color calibrations
    Teff {
        #[structopt(long)]
        j: f64,
        #[structopt(long)]
        h: f64,
        #[structopt(long)]
        ks: f64,
        #[structopt(long)]
        b: f64,
        #[structopt(long)]
        v: f64,
        /// E(B-V) reddening
        #[structopt(long, default_value = "0")]
        e_bv: f64,
        /// [Fe/H], 99 if unknown
        #[structopt(long, default_value = "99")]
        feh: f64,
        /// dwarf or giant
        #[structopt(long)]
        class: LuminosityClass,
        /// v-ks, v-jh or b-v (or 0, 1, 2)
        #[structopt(long, default_value = "v-ks")]
        mode: ColorMode,
    },
    /// Surface gravity from the parallax
    Logg {
        #[structopt(long)]
        v: f64,
        /// V band extinction
        #[structopt(long, default_value = "0")]
        a_v: f64,
        /// parallax [arcsec]
        #[structopt(long)]
        parallax: f64,
        #[structopt(long)]
        teff: f64,
        /// mass [Msun]
        #[structopt(long)]
        mass: f64,
        #[structopt(long, default_value = "0")]
        feh: f64,
        /// Rescales A_V from the Schlegel et al. (1998) maps
        #[structopt(long)]
        sfd98: bool,
    },
    /// Red giant mass and age
    MassAge {
        #[structopt(long)]
        teff: f64,
        #[structopt(long)]
        logg: f64,
        /// [M/H]
        #[structopt(long)]
        mh: f64,
        /// [C/M]
        #[structopt(long)]
        cm: f64,
        /// [N/M]
        #[structopt(long)]
        nm: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    match Opt::from_args() {
        Opt::Teff {
            j,
            h,
            ks,
            b,
            v,
            e_bv,
            feh,
            class,
            mode,
        } => {
            let observation = Observation {
                j,
                h,
                ks,
                b,
                v,
                e_bv,
                feh,
            };
            let temperatures = compute_temperature(&observation, class, mode);
            print!("{}", temperatures);
            match temperatures.preferred() {
                Ok((teff, provenance)) => println!("Teff: {:.0}K ({})", teff, provenance),
                Err(e) => log::warn!("{}", e),
            }
            println!("{}", temperatures.to_legacy_string());
        }
        Opt::Logg {
            v,
            a_v,
            parallax,
            teff,
            mass,
            feh,
            sfd98,
        } => {
            let extinction = if sfd98 {
                ExtinctionScale::Sfd98
            } else {
                ExtinctionScale::AsIs
            };
            let estimate = compute_logg(
                &GravityInput {
                    v,
                    a_v,
                    parallax,
                    teff,
                    mass,
                    feh,
                },
                extinction,
            )?;
            println!(
                "BC: {:.3} ({:?}), Mbol: {:.3}",
                estimate.bc, estimate.polynomial, estimate.mbol
            );
            println!("{}", estimate);
        }
        Opt::MassAge {
            teff,
            logg,
            mh,
            cm,
            nm,
        } => {
            let mass_age = mass_age_giant(&GiantParameters {
                teff,
                logg,
                mh,
                cm,
                nm,
            })?;
            println!("{}", mass_age);
        }
    }
    Ok(())
}
