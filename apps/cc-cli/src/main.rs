use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use cc_config::CruiseConfig;
use cc_metrics::{compute_metrics, ResponseMetrics};
use cc_sim::{run_simulation, run_sweep, SimulationTrace};

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(about = "Cruiseflow CLI - closed-loop cruise control simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a parameter file
    Validate {
        /// Path to the parameter JSON file
        config_path: PathBuf,
    },
    /// Print the default parameter set as JSON
    Defaults,
    /// Run a simulation and report its metrics
    Run {
        /// Path to the parameter JSON file
        config_path: PathBuf,
        /// Write the full trace as CSV to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit metrics as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run one parameter across several values in parallel
    Sweep {
        /// Path to the base parameter JSON file
        config_path: PathBuf,
        /// Parameter to vary (kp, ki, kd, v_desired_m_s, grade_deg,
        /// wind_speed_m_s, dt_s, throttle_max)
        param: String,
        /// Values to assign, one run each
        values: Vec<f64>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] cc_config::ConfigError),

    #[error("Simulation error: {0}")]
    Sim(#[from] cc_sim::SimError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown sweep parameter: {0}")]
    UnknownParam(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Defaults => cmd_defaults(),
        Commands::Run {
            config_path,
            output,
            json,
        } => cmd_run(&config_path, output.as_deref(), json),
        Commands::Sweep {
            config_path,
            param,
            values,
        } => cmd_sweep(&config_path, &param, &values),
    }
}

fn load_config(path: &Path) -> CliResult<CruiseConfig> {
    let text = fs::read_to_string(path)?;
    Ok(CruiseConfig::from_json_str(&text)?)
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating parameters: {}", config_path.display());
    let _config = load_config(config_path)?;
    println!("✓ Parameters are valid");
    Ok(())
}

fn cmd_defaults() -> CliResult<()> {
    let config = CruiseConfig::default();
    println!("{}", config.to_json_string()?);
    Ok(())
}

fn cmd_run(config_path: &Path, output: Option<&Path>, json: bool) -> CliResult<()> {
    let config = load_config(config_path)?;
    let trace = run_simulation(&config)?;
    let metrics = compute_metrics(&trace, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        print_metrics(&metrics, &config);
    }

    if let Some(path) = output {
        let mut file = fs::File::create(path)?;
        write_trace_csv(&mut file, &trace)?;
        println!("Trace written to {}", path.display());
    }
    Ok(())
}

fn cmd_sweep(config_path: &Path, param: &str, values: &[f64]) -> CliResult<()> {
    let base = load_config(config_path)?;
    let configs: Vec<CruiseConfig> = values
        .iter()
        .map(|&v| apply_param(&base, param, v))
        .collect::<CliResult<_>>()?;

    let results = run_sweep(&configs);

    println!("{param:>16} {:>10} {:>10} {:>10} {:>12}", "rise_s", "settle_s", "over_pct", "ss_err_m_s");
    for (config, result) in configs.iter().zip(results) {
        let value = param_value(config, param);
        match result {
            Ok(trace) => {
                let m = compute_metrics(&trace, config);
                println!(
                    "{value:>16.4} {:>10} {:>10} {:>10.2} {:>12.4}",
                    fmt_opt(m.rise_time_s),
                    fmt_opt(m.settling_time_s),
                    m.overshoot_pct,
                    m.steady_state_error_m_s,
                );
            }
            Err(e) => println!("{value:>16.4} run failed: {e}"),
        }
    }
    Ok(())
}

fn apply_param(base: &CruiseConfig, param: &str, value: f64) -> CliResult<CruiseConfig> {
    let mut config = base.clone();
    match param {
        "kp" => config.kp = value,
        "ki" => config.ki = value,
        "kd" => config.kd = value,
        "v_desired_m_s" => config.v_desired_m_s = value,
        "grade_deg" => config.grade_deg = value,
        "wind_speed_m_s" => config.wind_speed_m_s = value,
        "dt_s" => config.dt_s = value,
        "throttle_max" => config.throttle_max = value,
        other => return Err(CliError::UnknownParam(other.to_string())),
    }
    config.validate()?;
    Ok(config)
}

fn param_value(config: &CruiseConfig, param: &str) -> f64 {
    match param {
        "kp" => config.kp,
        "ki" => config.ki,
        "kd" => config.kd,
        "v_desired_m_s" => config.v_desired_m_s,
        "grade_deg" => config.grade_deg,
        "wind_speed_m_s" => config.wind_speed_m_s,
        "dt_s" => config.dt_s,
        "throttle_max" => config.throttle_max,
        _ => f64::NAN,
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{x:.2}"),
        None => "-".to_string(),
    }
}

fn print_metrics(metrics: &ResponseMetrics, config: &CruiseConfig) {
    println!("Target speed:       {:.2} m/s", config.v_desired_m_s);
    println!("Rise time (90%):    {}", fmt_opt(metrics.rise_time_s));
    println!("Settling time (2%): {}", fmt_opt(metrics.settling_time_s));
    println!("Overshoot:          {:.2} %", metrics.overshoot_pct);
    println!(
        "Steady-state error: {:.4} m/s",
        metrics.steady_state_error_m_s
    );
}

fn write_trace_csv(out: &mut impl Write, trace: &SimulationTrace) -> io::Result<()> {
    writeln!(
        out,
        "time_s,speed_m_s,throttle,error_m_s,engine_force_n,disturbance_force_n"
    )?;
    for s in trace.samples() {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            s.time_s, s.speed_m_s, s.throttle, s.error_m_s, s.engine_force_n, s.disturbance_force_n
        )?;
    }
    Ok(())
}
