/// Metadata used to identify and describe a UseCase
pub trait UseCaseMetadata {
    /// UseCase index (e.g. "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g. "import_chain_menus")
    fn usecase_name() -> &'static str;

    /// Name shown in the UI
    fn display_name() -> &'static str;

    /// Description of the UseCase
    fn description() -> &'static str {
        ""
    }

    /// Full name like "u501_import_chain_menus"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
