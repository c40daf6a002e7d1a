use anyhow::Result;
use physics_lab::{config, report, telemetry};
use config::Config;
use rand::{rngs::StdRng, SeedableRng};
use report::Report;
use telemetry::init_tracing;
use tracing::{info, warn};

fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let mut rng = match cfg.solar.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => {
            warn!("no random seed configured, sun-hour placement will not be reproducible");
            StdRng::from_entropy()
        }
    };

    info!(
        latitude_deg = cfg.solar.panel.latitude_deg,
        follow_sun = cfg.solar.follow_sun,
        dt = cfg.oscillator.dt,
        "running physics lab"
    );

    let report = Report::run(&cfg, &mut rng)?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report)?;
    println!();

    info!("report written");
    Ok(())
}
