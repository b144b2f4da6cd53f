//! Employee records

use serde::{Deserialize, Serialize};

/// Read-only employee reference, fetched for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
}
