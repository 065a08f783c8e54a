//! Pre-conversation selection wizard
//!
//! Difficulty is chosen first, then the product. A conversation can only be
//! started from a [`Selection::Ready`] value.

use crate::persona::{Difficulty, Product};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("difficulty must be chosen first")]
    DifficultyNotChosen,
    #[error("product has not been chosen")]
    ProductNotChosen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    ChoosingDifficulty,
    ChoosingProduct {
        difficulty: Difficulty,
    },
    Ready {
        difficulty: Difficulty,
        product: Product,
    },
}

impl Selection {
    /// Picking a difficulty always restarts the product choice
    #[must_use]
    pub fn choose_difficulty(self, difficulty: Difficulty) -> Self {
        Selection::ChoosingProduct { difficulty }
    }

    pub fn choose_product(self, product: Product) -> Result<Self, SelectionError> {
        match self {
            Selection::ChoosingDifficulty => Err(SelectionError::DifficultyNotChosen),
            Selection::ChoosingProduct { difficulty } | Selection::Ready { difficulty, .. } => {
                Ok(Selection::Ready {
                    difficulty,
                    product,
                })
            }
        }
    }

    pub fn ready(self) -> Result<(Difficulty, Product), SelectionError> {
        match self {
            Selection::Ready {
                difficulty,
                product,
            } => Ok((difficulty, product)),
            Selection::ChoosingProduct { .. } => Err(SelectionError::ProductNotChosen),
            Selection::ChoosingDifficulty => Err(SelectionError::DifficultyNotChosen),
        }
    }
}
