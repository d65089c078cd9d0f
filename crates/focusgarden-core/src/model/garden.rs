use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantKind {
    Sapling,
    Tree,
    Flower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStatus {
    Alive,
    Withered,
}

/// One reward/penalty record in the garden.
///
/// The garden is an append-only log: the engine creates exactly one
/// plant per completed or abandoned non-prep session and never mutates
/// or deletes existing entries. Ids are time-based (epoch ms at
/// creation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenPlant {
    pub id: i64,
    pub kind: PlantKind,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub status: PlantStatus,
}
