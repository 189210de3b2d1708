use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of an in-progress cart.
///
/// `Submitted` is terminal: once the order backend acknowledged the cart, edits go through
/// the persisted order instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartStatus {
    #[default]
    Editable,
    Submitted,
}

impl CartStatus {
    pub fn is_editable(self) -> bool {
        self == CartStatus::Editable
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartStatus::Editable => f.write_str("editable"),
            CartStatus::Submitted => f.write_str("submitted"),
        }
    }
}
