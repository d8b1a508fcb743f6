// Art Gallery - Core Library
// In-memory catalog of art pieces: add, remove, and query by artist, recency and price

pub mod clock;
pub mod config;
pub mod entities;
pub mod error;
pub mod gallery;
pub mod import;
pub mod schema;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GalleryConfig;
pub use entities::{Art, ArtDraft, ArtType, ParseArtTypeError};
pub use error::GalleryError;
pub use gallery::{display_order, sort_for_display, ArtSnapshot, Gallery, PriceRange};
pub use import::{load_csv, read_csv, seed, ImportSummary};
pub use schema::{Field, FieldViolation, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
