pub mod assistant;
pub mod repositories;
