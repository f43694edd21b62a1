//! Card system: faces, cards, asset providers and deck building.
//!
//! ## Key Types
//!
//! - `CardId`: Stable per-deck identifier
//! - `AssetRef`: Visual identity shared by the two cards of a pair
//! - `Card`: A card on the board with its flipped/matched flags
//! - `AssetProvider`: Collaborator supplying unique faces per theme
//! - `DeckBuilder`: Difficulty + theme -> shuffled paired deck

pub mod assets;
pub mod card;
pub mod deck;

pub use assets::{AssetProvider, CachedAssets, ThemeCatalog};
pub use card::{AssetRef, Card, CardId};
pub use deck::{is_well_paired, DeckBuilder};
