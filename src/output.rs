// src/output.rs
use crate::distributions::density::Density;
use crate::error::{validation::*, SdeResult};
use crate::trajectory::Trajectory;
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Long format: one row per (timestep, batch element)
pub fn write_trajectory_csv<P: AsRef<Path>>(path: P, trajectory: &Trajectory) -> SdeResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let header: Vec<String> = (0..trajectory.dim()).map(|j| format!("x{}", j)).collect();
    writeln!(file, "t_idx,t,sample,{}", header.join(","))?;
    for (t_idx, (t, state)) in trajectory.times().iter().zip(trajectory.states()).enumerate() {
        for (i, row) in state.outer_iter().enumerate() {
            let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(file, "{},{},{},{}", t_idx, t, i, values.join(","))?;
        }
    }
    file.flush()?;
    Ok(())
}

pub fn write_samples_csv<P: AsRef<Path>>(path: P, samples: &Array2<f64>) -> SdeResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let header: Vec<String> = (0..samples.ncols()).map(|j| format!("x{}", j)).collect();
    writeln!(file, "{}", header.join(","))?;
    for row in samples.outer_iter() {
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(file, "{}", values.join(","))?;
    }
    file.flush()?;
    Ok(())
}

/// Log-density of a 2-D density on a `bins × bins` grid over `[-scale, scale]²`
pub fn write_density_grid_csv<P: AsRef<Path>, D: Density + ?Sized>(
    path: P,
    density: &D,
    bins: usize,
    scale: f64,
) -> SdeResult<()> {
    validate_count("bins", bins)?;
    validate_positive("scale", scale)?;
    validate_shape("density dimension", &[2], &[density.dim()])?;

    let axis = Array1::linspace(-scale, scale, bins);
    let grid = Array2::from_shape_fn((bins * bins, 2), |(k, j)| {
        if j == 0 {
            axis[k / bins]
        } else {
            axis[k % bins]
        }
    });
    let log_p = density.log_density(&grid)?;

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "x,y,log_density")?;
    for (point, lp) in grid.outer_iter().zip(log_p.iter()) {
        writeln!(file, "{},{},{}", point[0], point[1], lp)?;
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::density::Sampleable;
    use crate::distributions::gaussian::Gaussian;
    use crate::models::brownian::BrownianMotion;
    use crate::rng;
    use crate::schedule::Timesteps;
    use crate::solvers::euler_maruyama::EulerMaruyamaSimulator;
    use crate::solvers::simulator::Simulator;

    #[test]
    fn test_trajectory_and_grid_csv() {
        let dir = std::env::temp_dir();
        let traj_path = dir.join(format!("langevin_sde_traj_{}.csv", std::process::id()));
        let grid_path = dir.join(format!("langevin_sde_grid_{}.csv", std::process::id()));

        let sim = EulerMaruyamaSimulator::new(BrownianMotion::new(1.0).unwrap());
        let ts = Timesteps::linspace(0.0, 1.0, 4).unwrap();
        let traj = sim
            .simulate_with_trajectory(&Array2::zeros((3, 2)), &ts, &mut rng::seed_rng_from_u64(1))
            .unwrap();
        write_trajectory_csv(&traj_path, &traj).unwrap();
        let contents = std::fs::read_to_string(&traj_path).unwrap();
        assert_eq!(contents.lines().count(), 1 + 4 * 3);
        assert!(contents.starts_with("t_idx,t,sample,x0,x1"));

        write_density_grid_csv(&grid_path, &Gaussian::standard(2).unwrap(), 5, 2.0).unwrap();
        let grid = std::fs::read_to_string(&grid_path).unwrap();
        assert_eq!(grid.lines().count(), 1 + 25);

        let _ = std::fs::remove_file(traj_path);
        let _ = std::fs::remove_file(grid_path);
    }

    #[test]
    fn test_samples_csv() {
        let path = std::env::temp_dir().join(format!("langevin_sde_samples_{}.csv", std::process::id()));
        let samples = Gaussian::standard(3)
            .unwrap()
            .sample(7, &mut rng::seed_rng_from_u64(2))
            .unwrap();
        write_samples_csv(&path, &samples).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1 + 7);
        assert_eq!(lines[0], "x0,x1,x2");
        assert!(lines[1..].iter().all(|l| l.split(',').count() == 3));

        let _ = std::fs::remove_file(path);
    }
}
