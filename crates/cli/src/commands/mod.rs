pub mod check;
pub mod seed;
