pub mod brownian;
pub mod langevin;
pub mod model;
pub mod ou_process;
