// Unit domain model

/// A selectable learning unit. `world_id` is the externally meaningful key
/// used for dashboard queries; `id` only identifies the unit in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub world_id: String,
    pub unit_name: String,
}

impl Unit {
    pub fn new(id: i64, world_id: String, unit_name: String) -> Self {
        Self {
            id,
            world_id,
            unit_name,
        }
    }
}
