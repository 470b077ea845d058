// demos/error_handling_demo.rs
use langevin_sde::distributions::gaussian::Gaussian;
use langevin_sde::distributions::mixture::GaussianMixture;
use langevin_sde::error::SdeError;
use langevin_sde::mc::ensemble::EnsembleConfig;
use langevin_sde::models::ou_process::OUProcess;
use langevin_sde::rng;
use langevin_sde::schedule::Timesteps;
use langevin_sde::solvers::euler_maruyama::EulerMaruyamaSimulator;
use langevin_sde::solvers::simulator::Simulator;
use ndarray::{array, Array2};

fn main() {
    println!("Error Handling Demo for langevin-sde");
    println!("====================================\n");

    // Test 1: Negative diffusion coefficient
    println!("1. Testing negative sigma...");

    match OUProcess::new(0.25, -1.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Non-increasing schedule
    println!("\n2. Testing non-increasing timesteps...");

    match Timesteps::new(vec![0.0, 0.5, 0.5, 1.0]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Covariance that is not positive definite
    println!("\n3. Testing indefinite covariance...");

    match Gaussian::new(array![0.0, 0.0], array![[1.0, 3.0], [3.0, 1.0]]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Mixture weight count disagrees with the number of modes
    println!("\n4. Testing mixture shape mismatch...");

    let means = array![[0.0, 0.0], [3.0, 3.0]];
    let covs = ndarray::Array3::from_shape_fn((2, 2, 2), |(_, i, j)| if i == j { 1.0 } else { 0.0 });
    match GaussianMixture::new(means, covs, array![0.5, 0.25, 0.25]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: State batch of the wrong dimension for a Langevin target
    println!("\n5. Testing state/density dimension mismatch...");

    let target = Gaussian::standard(2).expect("valid Gaussian");
    let sde = langevin_sde::models::langevin::LangevinSDE::new(1.0, &target).expect("valid sigma");
    let sim = EulerMaruyamaSimulator::new(sde);
    let ts = Timesteps::linspace(0.0, 1.0, 10).expect("valid schedule");
    let mut rng = rng::seed_rng_from_u64(42);

    match sim.simulate(&Array2::zeros((4, 3)), &ts, &mut rng) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Invalid ensemble configuration
    println!("\n6. Testing invalid ensemble configuration...");

    let invalid_config = EnsembleConfig {
        runs: 0,
        ..Default::default()
    };
    match invalid_config.validate() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Valid configuration should work
    println!("\n7. Testing valid simulation...");

    let ou = OUProcess::new(0.25, 0.5).expect("valid parameters");
    let sim = EulerMaruyamaSimulator::new(ou);
    match sim.simulate(&Array2::from_elem((3, 1), 10.0), &ts, &mut rng) {
        Ok(x) => println!("   ✓ Success: final states = {:?}", x.column(0).to_vec()),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 8: Error type matching
    println!("\n8. Testing error type matching...");

    match GaussianMixture::symmetric_2d(4, -1.0, 5.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(SdeError::InvalidParameters {
            parameter,
            value,
            constraint,
        }) => {
            println!("   ✓ Caught InvalidParameters: {} = {} ({})", parameter, value, constraint);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
