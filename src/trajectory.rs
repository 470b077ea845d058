// src/trajectory.rs
use crate::error::{SdeError, SdeResult};
use crate::schedule::Timesteps;
use ndarray::{s, Array1, Array2, Array3};

/// Recorded states of a batched simulation, one per timestep.
///
/// Built by `Simulator::simulate_with_trajectory`; read-only afterwards.
/// Every state has the same `(batch_size, dim)` shape as the initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Array1<f64>,
    states: Vec<Array2<f64>>,
}

impl Trajectory {
    pub(crate) fn with_capacity(timesteps: &Timesteps, initial: Array2<f64>) -> Self {
        let mut states = Vec::with_capacity(timesteps.len());
        states.push(initial);
        Self {
            times: timesteps.as_array().clone(),
            states,
        }
    }

    pub(crate) fn push(&mut self, state: Array2<f64>) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn states(&self) -> &[Array2<f64>] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&Array2<f64>> {
        self.states.get(index)
    }

    pub fn initial_state(&self) -> &Array2<f64> {
        &self.states[0]
    }

    pub fn final_state(&self) -> &Array2<f64> {
        &self.states[self.states.len() - 1]
    }

    pub fn batch_size(&self) -> usize {
        self.states[0].nrows()
    }

    pub fn dim(&self) -> usize {
        self.states[0].ncols()
    }

    /// Path of coordinate `component` of batch element `batch_index` over time
    pub fn series(&self, batch_index: usize, component: usize) -> SdeResult<Array1<f64>> {
        if batch_index >= self.batch_size() || component >= self.dim() {
            return Err(SdeError::ShapeMismatch {
                context: "trajectory series index".to_string(),
                expected: vec![self.batch_size(), self.dim()],
                found: vec![batch_index, component],
            });
        }
        Ok(self
            .states
            .iter()
            .map(|x| x[[batch_index, component]])
            .collect())
    }

    /// Stack into a `(batch_size, num_timesteps, dim)` array
    pub fn to_array3(&self) -> Array3<f64> {
        let mut out = Array3::zeros((self.batch_size(), self.len(), self.dim()));
        for (i, state) in self.states.iter().enumerate() {
            out.slice_mut(s![.., i, ..]).assign(state);
        }
        out
    }

    /// Keep indices `0, n, 2n, …` and always the final index.
    ///
    /// Used to pick frames when rendering a long rollout.
    pub fn every_nth(&self, n: usize) -> SdeResult<Trajectory> {
        let indices = every_nth_index(self.len(), n)?;
        Ok(Trajectory {
            times: indices.iter().map(|&i| self.times[i]).collect(),
            states: indices.iter().map(|&i| self.states[i].clone()).collect(),
        })
    }
}

/// Indices `0, n, 2n, …` below `len - 1`, followed by `len - 1`
pub fn every_nth_index(len: usize, n: usize) -> SdeResult<Vec<usize>> {
    if n == 0 {
        return Err(SdeError::InvalidConfiguration {
            field: "n".to_string(),
            reason: "stride must be greater than 0".to_string(),
        });
    }
    if len == 0 {
        return Ok(Vec::new());
    }
    if n == 1 {
        return Ok((0..len).collect());
    }
    let mut indices: Vec<usize> = (0..len - 1).step_by(n).collect();
    indices.push(len - 1);
    Ok(indices)
}
