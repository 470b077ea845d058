pub mod ou_analytic;
pub mod statistics;
