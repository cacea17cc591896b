use stellar_params::{plot, ExcessSample};
use structopt::{clap::AppSettings, StructOpt};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ir-excess",
    about = "Lithium abundance versus WISE [3.4]-[22] color",
    global_settings = &[AppSettings::AllowNegativeNumbers]
)]
struct Opt {
    /// Path to the (color, A(Li)) table
    path: String,
    /// Number of lines before the data
    #[structopt(long, default_value = "1")]
    skip_rows: usize,
    /// Row indices of the IR excess stars
    #[structopt(
        long,
        use_delimiter = true,
        default_value = "70,74,76,78,79,80,81,82,83,84,85"
    )]
    excess: Vec<usize>,
    /// Color and A(Li) of the highlighted target [default: 1.734 5.2]
    #[structopt(long, number_of_values = 2)]
    target: Option<Vec<f64>>,
    /// Leaves the target out of the figure
    #[structopt(long)]
    no_target: bool,
    #[structopt(long, default_value = "figure_excess.svg")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let sample = ExcessSample::load(&opt.path, opt.skip_rows, &opt.excess)?;
    log::info!(
        "{} stars, {} with IR excess",
        sample.len(),
        sample.points(true).count()
    );
    let target = match opt.target.as_deref() {
        _ if opt.no_target => None,
        Some([x, y]) => Some((*x, *y)),
        _ => Some(plot::HYPER_LI_TARGET),
    };
    plot::ir_excess(&opt.output, &sample, target)?;

    Ok(())
}
