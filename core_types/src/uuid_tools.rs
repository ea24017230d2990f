use uuid::Uuid;

/// Mints a fresh collision-resistant identifier.
///
/// Every cell and every judgment gets its identity from here exactly once;
/// identifiers are never derived from names or positions.
pub fn new_uuid() -> Uuid {
    Uuid::new_v4()
}
