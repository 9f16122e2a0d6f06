use anyhow::Context;
use clap::Parser;
use mesh_vibration::utils::error::MotionError;
use mesh_vibration::utils::{logger, validation::Validate};
use mesh_vibration::{
    CliConfig, LocalStorage, MotionSampler, RigidBodyVelocity, TimeSchedule, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}'", args.config);
            exit_with(e)
        }
    };

    if config.json_logs() && !args.verbose {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("Loaded run file {}", args.config);

    if let Some(kind) = &args.kind {
        config.motion.kind = kind.clone();
        tracing::info!("🔧 Motion kind overridden to: {}", kind);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e)
    }

    if let Some(time) = args.time {
        return evaluate_single(&config, time);
    }

    let schedule = match config.sampling_schedule() {
        Ok(schedule) => schedule,
        Err(e) => exit_with(e),
    };
    display_config_summary(&config, &schedule);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        return Ok(());
    }

    let profile = config.build_motion()?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let sampler = MotionSampler::new(storage, profile, schedule, config.samples_per_cycle());

    match sampler.run(config.filename(), &config.output_formats()?) {
        Ok(paths) => {
            for path in &paths {
                println!("📁 Output saved to: {}", path);
            }
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn evaluate_single(config: &TomlConfig, time: f64) -> anyhow::Result<()> {
    let profile = config
        .build_motion()
        .with_context(|| format!("building motion for zone '{}'", config.zone()))?;

    let mut out = RigidBodyVelocity::default();
    profile.apply(time, &mut out);
    tracing::debug!(time, displacement = profile.displacement(time), "single evaluation");

    println!(
        "{} t={:e} v=({:e}, {:e}, {:e})",
        profile.name(),
        time,
        out.velocity.x(),
        out.velocity.y(),
        out.velocity.z()
    );
    Ok(())
}

fn display_config_summary(config: &TomlConfig, schedule: &TimeSchedule) {
    tracing::info!("📋 Run summary:");
    tracing::info!("   Motion: {} (zone: {})", config.motion.kind, config.zone());
    tracing::info!("   Cycles: {} over {:e} time units", schedule.n_cycles, schedule.total_time);
    tracing::info!(
        "   Step size: min {:e}, max {:e}, initial {:e}",
        schedule.min_step,
        schedule.max_step,
        schedule.initial_step
    );
    tracing::info!("   Save every {:e}", schedule.save_interval);
    tracing::info!(
        "   Output: {} as {}",
        config.output_path(),
        config.output.formats.join(", ")
    );
}

fn exit_with(e: MotionError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
