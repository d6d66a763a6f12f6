mod args;
mod sink;

use std::fs::File;
use std::io::Write;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use musicstar_core::config::Config;
use musicstar_core::driver::Driver;
use musicstar_core::script::Script;
use musicstar_types::StarSequencer;

use args::{Options, USAGE};
use sink::PrintSink;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("musicstar")
        .join("musicstar.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/musicstar.log")) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("musicstar: cannot create log file: {}", e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("musicstar: failed to initialize logger: {}", e);
        return;
    }

    log::info!("musicstar starting (log level: {:?})", log_level);
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match Options::parse(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("musicstar: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    if opts.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    init_logging(opts.verbose);

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("musicstar: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Options) -> Result<(), String> {
    let config = match &opts.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut script = match &opts.script {
        Some(path) => Script::load(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => Script::default(),
    };

    let fps = opts.fps.unwrap_or_else(|| config.frame_rate());
    let frame_dt = Duration::from_secs_f64(1.0 / f64::from(fps));
    let frames = (opts.seconds * f64::from(fps)).ceil() as u64;
    let mut driver = Driver::new(StarSequencer::new(&config.settings()));

    log::info!(
        "running {} frame(s) at {} fps, {} scripted action(s)",
        frames,
        fps,
        script.len()
    );

    let stdout = std::io::stdout();
    let mut sink = PrintSink::new(stdout.lock(), config.tuning_a4(), opts.json);
    let started = Instant::now();

    for frame in 0..frames {
        let now = driver.clock().as_secs_f64();
        for entry in script.take_due(now) {
            let result = driver.dispatch(&entry.action);
            log::info!("t={:.3}s {:?} ({} update(s))", now, entry.action, result.updates.len());
        }

        sink.now = (driver.clock() + frame_dt).as_secs_f64();
        driver.frame(frame_dt, &mut sink);

        if opts.realtime {
            let target = frame_dt.mul_f64((frame + 1) as f64);
            if let Some(wait) = target.checked_sub(started.elapsed()) {
                std::thread::sleep(wait);
            }
        }
    }

    let mut out = sink.into_inner();
    if opts.dump_state {
        let json = serde_json::to_string_pretty(driver.sequencer())
            .map_err(|e| format!("could not serialize state: {}", e))?;
        writeln!(out, "{}", json).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}
