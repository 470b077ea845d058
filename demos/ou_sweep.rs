// demos/ou_sweep.rs
use langevin_sde::analytics::{ou_analytic, statistics};
use langevin_sde::mc::ensemble::{pool_final_states, simulate_ensemble, EnsembleConfig};
use langevin_sde::models::ou_process::OUProcess;
use langevin_sde::output;
use langevin_sde::solvers::euler_maruyama::EulerMaruyamaSimulator;
use langevin_sde::SdeResult;
use ndarray::{Array1, Array2, Axis};
use tracing_subscriber::EnvFilter;

fn main() -> SdeResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let thetas_and_sigmas = [(0.25, 0.0), (0.25, 0.25), (0.25, 0.5), (0.25, 1.0)];
    let x0 = Array1::linspace(-10.0, 10.0, 10).insert_axis(Axis(1));
    let cfg = EnsembleConfig {
        runs: 200,
        t_start: 0.0,
        t_end: 20.0,
        num_timesteps: 1000,
        seed: 7,
    };

    println!("{:>6} {:>6} {:>12} {:>12} {:>12}", "theta", "sigma", "var(t=20)", "theory", "stationary");
    for &(theta, sigma) in &thetas_and_sigmas {
        let ou = OUProcess::new(theta, sigma)?;
        let sim = EulerMaruyamaSimulator::new(ou);
        let finals = pool_final_states(&simulate_ensemble(&sim, &x0, &cfg)?)?;

        // runs are stacked in x0 order; subtract each row's deterministic mean
        let n0 = x0.nrows();
        let residual = Array2::from_shape_fn(finals.raw_dim(), |(i, j)| {
            finals[[i, j]] - ou_analytic::ou_mean(x0[[i % n0, j]], theta, cfg.t_end)
        });
        let var = statistics::column_std_devs(&residual)?[0].powi(2);
        println!(
            "{:>6.2} {:>6.2} {:>12.5} {:>12.5} {:>12.5}",
            theta,
            sigma,
            var,
            ou_analytic::ou_variance(theta, sigma, cfg.t_end),
            ou.stationary_variance()?
        );

        if sigma > 0.0 {
            let path = format!("ou_theta{}_sigma{}.csv", theta, sigma);
            output::write_samples_csv(&path, &finals)?;
        }
    }
    Ok(())
}
