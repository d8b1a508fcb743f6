// Entity Models
//
// Art pieces are immutable values whose identity is their content:
// (name, art type, artist). Everything else about a piece is a plain value.

pub mod art;

pub use art::{Art, ArtDraft, ArtType, ParseArtTypeError};
