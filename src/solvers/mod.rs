pub mod euler;
pub mod euler_maruyama;
pub mod simulator;
