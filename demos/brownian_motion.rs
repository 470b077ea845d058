// demos/brownian_motion.rs
use langevin_sde::analytics::{ou_analytic, statistics};
use langevin_sde::models::brownian::BrownianMotion;
use langevin_sde::output;
use langevin_sde::rng;
use langevin_sde::schedule::Timesteps;
use langevin_sde::solvers::euler_maruyama::EulerMaruyamaSimulator;
use langevin_sde::solvers::simulator::Simulator;
use langevin_sde::SdeResult;
use ndarray::Array2;
use tracing_subscriber::EnvFilter;

fn main() -> SdeResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sigma = 0.1;
    let simulator = EulerMaruyamaSimulator::new(BrownianMotion::new(sigma)?);
    let x0 = Array2::zeros((5, 1));
    let ts = Timesteps::linspace(0.0, 5.0, 500)?;
    let mut rng = rng::seed_rng_from_u64(42);

    let trajectory = simulator.simulate_with_trajectory(&x0, &ts, &mut rng)?;
    let finals = trajectory.final_state();

    println!("Brownian motion, sigma = {}", sigma);
    println!("Final states at t = {}: {:?}", ts.end(), finals.column(0).to_vec());
    println!(
        "Empirical std: {:.4} (theory {:.4})",
        statistics::column_std_devs(finals)?[0],
        ou_analytic::brownian_std(sigma, ts.end())
    );

    output::write_trajectory_csv("brownian_trajectories.csv", &trajectory)?;
    println!("Trajectories written to brownian_trajectories.csv");
    Ok(())
}
