//! Daily protein planner: target split across meals, food picker, presets,
//! templates and a saved plan.

mod view;
mod view_model;

pub use view::MealPlannerPage;
