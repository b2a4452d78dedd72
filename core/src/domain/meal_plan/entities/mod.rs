pub mod generated_meal_plan;
pub mod week_plan;

pub use generated_meal_plan::*;
pub use week_plan::*;
