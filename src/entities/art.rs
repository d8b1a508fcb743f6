// 🖼️ Art Entity - Immutable value with content identity
//
// "Identity is the (name, type, artist) triple. Price and date are just values."
//
// Two pieces with the same name, type and artist are the same piece, even when
// one was catalogued with a different date or asking price. Equality and
// hashing look at the triple only, so the gallery's uniqueness check falls out
// of ordinary set semantics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::schema::{self, ValidationError};

// ============================================================================
// ART TYPE
// ============================================================================

/// Serialized as the upper-case token; deserialized through `FromStr`, so
/// any casing is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum ArtType {
    /// Oil, acrylic, watercolour...
    Painting,

    /// Carved, cast or modelled three-dimensional work
    Sculpture,

    Drawing,

    /// Etchings, lithographs, screen prints
    Print,

    Photograph,

    /// Site-specific or mixed-media installation
    Installation,
}

impl ArtType {
    pub const ALL: [ArtType; 6] = [
        ArtType::Painting,
        ArtType::Sculpture,
        ArtType::Drawing,
        ArtType::Print,
        ArtType::Photograph,
        ArtType::Installation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtType::Painting => "PAINTING",
            ArtType::Sculpture => "SCULPTURE",
            ArtType::Drawing => "DRAWING",
            ArtType::Print => "PRINT",
            ArtType::Photograph => "PHOTOGRAPH",
            ArtType::Installation => "INSTALLATION",
        }
    }
}

impl fmt::Display for ArtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown art type '{input}' (expected one of: PAINTING, SCULPTURE, DRAWING, PRINT, PHOTOGRAPH, INSTALLATION)")]
pub struct ParseArtTypeError {
    pub input: String,
}

impl FromStr for ArtType {
    type Err = ParseArtTypeError;

    /// Case-insensitive: "painting", "Painting" and "PAINTING" all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        ArtType::ALL
            .into_iter()
            .find(|art_type| art_type.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseArtTypeError {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for ArtType {
    type Error = ParseArtTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// ART DRAFT (construction input)
// ============================================================================

/// Everything needed to construct an [`Art`], with every field optional.
///
/// Required fields (`name`, `art_type`, `artist_name`) are checked by
/// [`ArtDraft::build`]; a missing `creation_date` defaults to today, and a
/// missing `price` means the piece has no asking price.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtDraft {
    pub name: Option<String>,
    pub art_type: Option<ArtType>,
    pub artist_name: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub price: Option<Decimal>,
}

impl ArtDraft {
    /// Draft with the three identity fields set
    pub fn new(name: impl Into<String>, art_type: ArtType, artist_name: impl Into<String>) -> Self {
        ArtDraft {
            name: Some(name.into()),
            art_type: Some(art_type),
            artist_name: Some(artist_name.into()),
            creation_date: None,
            price: None,
        }
    }

    pub fn created_on(mut self, creation_date: NaiveDate) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    pub fn priced(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Validate and build, defaulting the creation date to today's local date
    pub fn build(self) -> Result<Art, ValidationError> {
        self.build_as_of(SystemClock.today())
    }

    /// Validate and build, defaulting the creation date to `today`
    ///
    /// Fails with every missing required field listed, not just the first one.
    pub fn build_as_of(self, today: NaiveDate) -> Result<Art, ValidationError> {
        let valid = schema::validate_draft(self)?;

        Ok(Art {
            name: valid.name,
            art_type: valid.art_type,
            artist_name: valid.artist_name,
            creation_date: valid.creation_date.unwrap_or(today),
            price: valid.price,
        })
    }
}

// ============================================================================
// ART ENTITY
// ============================================================================

/// One piece of art. Immutable once built.
///
/// Identity: (name, art_type, artist_name)
/// Values: creation_date, price (excluded from `==` and `hash`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ArtDraft")]
pub struct Art {
    name: String,
    art_type: ArtType,
    artist_name: String,
    creation_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
}

impl Art {
    /// Construction entry point; same as [`ArtDraft::build`]
    pub fn build(draft: ArtDraft) -> Result<Art, ValidationError> {
        draft.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn art_type(&self) -> ArtType {
        self.art_type
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    /// Asking price, `None` when the piece is not for sale
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }
}

impl TryFrom<ArtDraft> for Art {
    type Error = ValidationError;

    fn try_from(draft: ArtDraft) -> Result<Self, Self::Error> {
        draft.build()
    }
}

impl PartialEq for Art {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.art_type == other.art_type
            && self.artist_name == other.artist_name
    }
}

impl Eq for Art {}

// Must hash exactly the fields compared in `eq`
impl Hash for Art {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.art_type.hash(state);
        self.artist_name.hash(state);
    }
}

impl fmt::Display for Art {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) by {}, {}",
            self.name, self.art_type, self.artist_name, self.creation_date
        )?;
        if let Some(price) = self.price {
            write!(f, ", {}", price)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
