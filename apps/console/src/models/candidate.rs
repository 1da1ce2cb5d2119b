use serde::{Deserialize, Serialize};

/// A candidate as provided by the sourcing side. Immutable once loaded;
/// the session only ever replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location_preference: String,
    pub disability: String,
    pub educational_qualification: String,
    pub work_experience: String,
    pub summary: String,
}
