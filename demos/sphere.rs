use std::path::PathBuf;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use artra::config::Config;
use artra::ensight::EnsightWriter;
use artra::gcibm::classify_domain;
use artra::hydro::error::Error;
use artra::hydro::euler::Primitive;
use artra::node::allocate_nodes;
use artra::partition::Partition;
use artra::solvers::sweep::{advance, stable_time_step};




#[derive(Debug, Parser)]
#[clap(version = "0.1", about = "Flow past a sphere with the artra flux core")]
struct Opts {
    /// CBOR case file; the built-in channel case is used when omitted
    #[clap(short = 'c', long)]
    case: Option<PathBuf>,

    /// Write the built-in case to this path and exit
    #[clap(long)]
    save_case: Option<PathBuf>,

    #[clap(short = 'n', long, default_value = "20")]
    steps: usize,

    #[clap(long, default_value = "10")]
    export_every: usize,

    #[clap(long, default_value = "0.4")]
    cfl: f64,

    #[clap(short = 'o', long, default_value = "output")]
    output: PathBuf,
}




// ============================================================================
fn main() -> Result<(), Error> {
    let opts = Opts::parse();

    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .map_err(|e| Error::Config(e.to_string()))?;

    if let Some(path) = &opts.save_case {
        Config::default().save(path)?;
        info!("wrote built-in case to {}", path.display());
        return Ok(());
    }

    let config = match &opts.case {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let grid = config.grid()?;
    let model = config.model()?;
    let obstacles = config.obstacles();
    let partition = Partition::new(&grid);
    let interior = partition.interior().clone();

    info!("Ma = {:.4}, normalized viscosity = {:.4e}", model.ref_mach, model.ref_mu);

    let free_stream = Primitive::new(1.0, 1.0, 0.0, 0.0, model.gas_constant, 1.0).to_conserved(model.gamma);
    let mut nodes = allocate_nodes(&grid, free_stream);
    classify_domain(&grid, &obstacles, &partition, &mut nodes)?;

    let mut writer = EnsightWriter::new(&opts.output);
    let mut tn = 0;
    let mut time = 0.0;

    writer.write(0, time, &grid, &partition, &nodes, tn, &model, &obstacles)?;

    for step in 1..=opts.steps {
        let dt = stable_time_step(opts.cfl, tn, &nodes, &grid, &interior, &model)?;
        tn = advance(&mut nodes, tn, dt, &grid, &interior, &model, &config.scheme)?;
        time += dt;
        info!("[{}] t={:.6} dt={:.3e}", step, time, dt);

        if step % opts.export_every.max(1) == 0 || step == opts.steps {
            writer.write(step, time, &grid, &partition, &nodes, tn, &model, &obstacles)?;
        }
    }
    info!("{} exports in {}", writer.output_count(), writer.transient_case_path().display());
    Ok(())
}
