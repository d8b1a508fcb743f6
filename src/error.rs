use rust_decimal::Decimal;
use thiserror::Error;

use crate::schema::ValidationError;

/// Errors raised by gallery construction and queries.
///
/// Returned straight to the caller; the gallery never retries or logs them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("price_limit_max should be higher than price_limit_min (given min {min}, max {max})")]
    InvalidPriceRange { min: Decimal, max: Decimal },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
