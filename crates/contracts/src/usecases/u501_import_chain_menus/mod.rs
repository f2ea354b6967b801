pub mod chain;
pub mod merge;

pub use chain::{Chain, ChainBatch};
pub use merge::{apply_batch, ImportSummary};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportChainMenus;

impl UseCaseMetadata for ImportChainMenus {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_chain_menus"
    }

    fn display_name() -> &'static str {
        "チェーン店メニュー一括インポート"
    }

    fn description() -> &'static str {
        "登録済みのチェーン店メニューを丸ごと差し替えます"
    }
}
