pub mod density;
pub mod gaussian;
pub mod mixture;
