pub mod plan;
pub mod presets;

pub use plan::{MealPlan, MealSlot, MealTargets, Meals, PlanItem, PlanSummary, PlannerError, SavedPlan};
pub use presets::{PlanTemplate, Preset, TemplateItem};

use crate::usecases::common::UseCaseMetadata;

pub struct MealPlanner;

impl UseCaseMetadata for MealPlanner {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "meal_planner"
    }

    fn display_name() -> &'static str {
        "タンパク質プランナー"
    }

    fn description() -> &'static str {
        "1日の目標タンパク質量を朝・昼・夕に配分し、食材を組み合わせて計画します"
    }
}
