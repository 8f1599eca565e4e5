use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Coordinate;

/// Request body shared by the three mutating endpoints.
///
/// Both fields are optional so that a missing or negative value folds into the
/// same "Invalid plot coordinates." rejection as an out-of-range one.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActionRequest {
    pub row: Option<i64>,
    pub col: Option<i64>,
}

impl ActionRequest {
    /// The requested position, when both fields are present and non-negative.
    /// Upper bounds are checked by the board service.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let row = usize::try_from(self.row?).ok()?;
        let col = usize::try_from(self.col?).ok()?;
        Some(Coordinate { row, col })
    }
}

/// Response envelope of the mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
