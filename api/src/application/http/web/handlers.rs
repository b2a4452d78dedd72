pub mod generate_plan;
pub mod index;
