use super::AggregateId;

/// Trait for the root of an aggregate.
///
/// Carries the per-entity configuration the generic [`super::Collection`]
/// needs: how to read the id, which prefix new ids get and how a record is
/// validated before it is stored.
pub trait AggregateRoot: Clone {
    /// Identifier type of the aggregate
    type Id: AggregateId;

    // ============================================================================
    // Instance data
    // ============================================================================

    /// Record id
    fn id(&self) -> &Self::Id;

    /// Human readable name shown in lists and confirmations
    fn display_name(&self) -> &str;

    /// Required-field validation
    fn validate(&self) -> Result<(), String>;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Index of the aggregate in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name inside the persisted snapshot (e.g. "restaurants")
    fn collection_name() -> &'static str;

    /// Prefix used for generated ids
    fn id_prefix() -> &'static str;

    /// UI name, singular
    fn element_name() -> &'static str;

    /// UI name, plural
    fn list_name() -> &'static str;
}
