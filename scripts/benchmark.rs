// scripts/benchmark.rs
use langevin_sde::analytics::{ou_analytic, statistics};
use langevin_sde::distributions::density::{Density, Sampleable};
use langevin_sde::distributions::gaussian::Gaussian;
use langevin_sde::distributions::mixture::GaussianMixture;
use langevin_sde::math_utils::Timer;
use langevin_sde::mc::ensemble::{pool_final_states, simulate_ensemble, EnsembleConfig};
use langevin_sde::models::langevin::LangevinSDE;
use langevin_sde::models::ou_process::OUProcess;
use langevin_sde::rng;
use langevin_sde::schedule::Timesteps;
use langevin_sde::solvers::euler_maruyama::EulerMaruyamaSimulator;
use langevin_sde::solvers::simulator::Simulator;
use langevin_sde::SdeResult;
use ndarray::{Array1, Array2};
use chrono::{DateTime, Utc};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    particles: usize,
    steps: usize,
    time_ms: f64,
    throughput_steps_per_sec: f64,
    value: f64,
    reference_value: Option<f64>,
}

fn run_ou_benchmarks() -> SdeResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let (theta, sigma, x0) = (0.25, 1.0, 10.0);
    let sim = EulerMaruyamaSimulator::new(OUProcess::new(theta, sigma)?);

    for &runs in &[100, 1_000, 10_000] {
        println!("Running OU ensemble with {} runs...", runs);
        let cfg = EnsembleConfig {
            runs,
            t_start: 0.0,
            t_end: 5.0,
            num_timesteps: 500,
            seed: 42,
        };
        let x_init = Array2::from_elem((10, 1), x0);

        let mut timer = Timer::new();
        timer.start();
        let finals = pool_final_states(&simulate_ensemble(&sim, &x_init, &cfg)?)?;
        let time_ms = timer.elapsed_ms();

        let particles = finals.nrows();
        let steps = particles * (cfg.num_timesteps - 1);
        let var = statistics::column_std_devs(&finals)?[0].powi(2);

        results.push(BenchmarkResult {
            name: format!("OU variance ({} particles)", particles),
            particles,
            steps,
            time_ms,
            throughput_steps_per_sec: steps as f64 / (time_ms / 1000.0),
            value: var,
            reference_value: Some(ou_analytic::ou_variance(theta, sigma, cfg.t_end)),
        });
    }

    Ok(results)
}

fn run_langevin_benchmarks() -> SdeResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let source = Gaussian::isotropic(Array1::zeros(2), 20.0)?;

    for &nmodes in &[3, 10, 30] {
        println!("Benchmarking Langevin toward a {}-mode mixture...", nmodes);
        let target = GaussianMixture::random_2d(nmodes, 0.75, 15.0, 3)?;
        let sim = EulerMaruyamaSimulator::new(LangevinSDE::new(0.6, &target)?);
        let ts = Timesteps::linspace(0.0, 5.0, 1000)?;
        let mut rng = rng::seed_rng_from_u64(7);
        let x0 = source.sample(1000, &mut rng)?;

        let mut timer = Timer::new();
        timer.start();
        let x = sim.simulate(&x0, &ts, &mut rng)?;
        let time_ms = timer.elapsed_ms();

        let steps = x.nrows() * (ts.len() - 1);
        let mean_log_p = target.log_density(&x)?.mean().unwrap_or(f64::NAN);

        results.push(BenchmarkResult {
            name: format!("Langevin {} modes", nmodes),
            particles: x.nrows(),
            steps,
            time_ms,
            throughput_steps_per_sec: steps as f64 / (time_ms / 1000.0),
            value: mean_log_p,
            reference_value: None,
        });
    }

    Ok(results)
}

fn results_filename(now: &DateTime<Utc>) -> String {
    format!("benchmark_results_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> SdeResult<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Particles,Steps,Time_ms,Throughput_steps_per_sec,Value,Reference_Value")?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{:.2},{:.0},{:.6},{}",
            result.name,
            result.particles,
            result.steps,
            result.time_ms,
            result.throughput_steps_per_sec,
            result.value,
            result
                .reference_value
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "N/A".to_string()),
        )?;
    }
    file.flush()?;

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> SdeResult<()> {
    println!("langevin-sde Benchmark Suite");
    println!("============================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut all_results = run_ou_benchmarks()?;
    all_results.extend(run_langevin_benchmarks()?);

    println!("\n{:=<96}", "");
    println!(
        "{:<32} {:>10} {:>12} {:>16} {:>10} {:>10}",
        "Benchmark", "Particles", "Time (ms)", "Steps/sec", "Value", "Reference"
    );
    println!("{:-<96}", "");
    for result in &all_results {
        println!(
            "{:<32} {:>10} {:>12.2} {:>16.0} {:>10.4} {:>10}",
            result.name,
            result.particles,
            result.time_ms,
            result.throughput_steps_per_sec,
            result.value,
            result
                .reference_value
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "N/A".to_string()),
        );
    }
    println!("{:=<96}", "");

    let filename = results_filename(&Utc::now());
    write_results_to_csv(&all_results, &system_info, &filename)?;

    println!("\nTo reproduce: cargo run --bin benchmark --release");
    Ok(())
}
