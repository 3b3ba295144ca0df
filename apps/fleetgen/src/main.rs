//! fleetgen: run a simulated vehicle fleet and write its telemetry.
//!
//! Builds a grid road network, creates a fleet round-robin across the
//! configured behavioural profiles, runs it for the configured simulated
//! duration, and streams readings and fuel-theft events into
//! `telemetry.csv` / `anomalies.csv` in the output directory.
//!
//! ```text
//! fleetgen --config fleet.json --vehicles 25 --duration-minutes 240
//! fleetgen --print-config > fleet.json
//! ```

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use env_logger::Env;
use log::info;

use fleet_core::SimRng;
use fleet_output::{CsvWriter, WriterStreamer, write_tables};
use fleet_sim::{FleetBuilder, MemoryStreamer, ProgressLogger};

use config::FleetConfig;

/// Simulate a vehicle fleet and write its telemetry and fuel-theft events.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for telemetry.csv and anomalies.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of vehicles
    #[arg(long)]
    vehicles: Option<usize>,

    /// Simulated duration in minutes
    #[arg(long)]
    duration_minutes: Option<u64>,

    /// Simulated seconds per tick
    #[arg(long)]
    tick_secs: Option<u32>,

    /// Readings per streamed batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// Simulated seconds per wall-clock second; omit to run flat out
    #[arg(long)]
    time_scale: Option<f64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// UTC start of the simulated clock (RFC 3339)
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Grid width in intersections
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in intersections
    #[arg(long)]
    height: Option<u32>,

    /// Number of refueling stations
    #[arg(long)]
    stations: Option<usize>,

    /// Keep the run in memory and write the tables once at the end
    #[arg(long)]
    buffered: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, c: &mut FleetConfig) {
        if let Some(v) = &self.output        { c.output_dir = v.clone(); }
        if let Some(v) = self.vehicles        { c.vehicles = v; }
        if let Some(v) = self.duration_minutes { c.run.duration_minutes = v; }
        if let Some(v) = self.tick_secs       { c.run.tick_secs = v; }
        if let Some(v) = self.batch_size      { c.run.batch_size = v; }
        if let Some(v) = self.time_scale      { c.run.real_time_scale = Some(v); }
        if let Some(v) = self.seed            { c.seed = Some(v); }
        if let Some(v) = self.start           { c.run.start_time = v; }
        if let Some(v) = self.width           { c.grid.width = v; }
        if let Some(v) = self.height          { c.grid.height = v; }
        if let Some(v) = self.stations        { c.grid.stations = v; }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut cfg = match &args.config {
        Some(path) => FleetConfig::load(path)?,
        None       => FleetConfig::default(),
    };
    args.apply(&mut cfg);

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }
    if cfg.vehicles == 0 {
        bail!("at least one vehicle is required");
    }

    let t0 = Instant::now();

    // ── Network ───────────────────────────────────────────────────────────
    let seed = cfg
        .seed
        .unwrap_or_else(|| SimRng::from_entropy().gen_range(0..=u64::MAX));
    info!("seed {seed}");
    let mut net_rng = SimRng::new(seed);
    let network = Arc::new(cfg.grid.build(&mut net_rng).context("building road network")?);

    // ── Fleet ─────────────────────────────────────────────────────────────
    let mut fleet = FleetBuilder::new(network)
        .seed(seed)
        .trip_policy(cfg.trips.clone())
        .vehicle_params(cfg.vehicle.clone())
        .build()?;
    fleet.create_fleet(cfg.vehicles, &cfg.profiles)?;

    // ── Run ───────────────────────────────────────────────────────────────
    let mut progress = ProgressLogger::new(cfg.run.progress_interval_ticks);
    let report = if args.buffered {
        let report = fleet.run(&cfg.run, &mut MemoryStreamer::new(), &mut progress)?;
        let mut writer = CsvWriter::new(&cfg.output_dir)?;
        write_tables(&fleet, &mut writer)?;
        report
    } else {
        let mut sink = WriterStreamer::new(CsvWriter::new(&cfg.output_dir)?);
        let report = fleet.run(&cfg.run, &mut sink, &mut progress)?;
        sink.finish()?;
        report
    };

    // ── Summary ───────────────────────────────────────────────────────────
    let status = fleet.fleet_status();
    println!("{}", serde_json::to_string_pretty(&status)?);
    info!(
        "wrote {} readings and {} anomalies to {} in {:.2?}",
        report.readings,
        report.anomalies,
        cfg.output_dir.display(),
        t0.elapsed(),
    );
    if report.unsent_readings > 0 {
        bail!("{} readings could not be written", report.unsent_readings);
    }
    Ok(())
}
