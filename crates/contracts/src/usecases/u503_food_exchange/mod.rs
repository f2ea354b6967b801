pub mod document;
pub mod storage_usage;

pub use document::{export_filename, parse_import, ExportDocument, ImportError, ImportedData};
pub use storage_usage::format_storage_usage;

use crate::usecases::common::UseCaseMetadata;

pub struct FoodExchange;

impl UseCaseMetadata for FoodExchange {
    fn usecase_index() -> &'static str {
        "u503"
    }

    fn usecase_name() -> &'static str {
        "food_exchange"
    }

    fn display_name() -> &'static str {
        "データ管理"
    }

    fn description() -> &'static str {
        "食材・カテゴリーのエクスポート、インポート、全データ削除"
    }
}
