//! Domain model for locations and assets.

mod asset;
mod error;
mod ids;
mod location;

pub use asset::{Asset, AssetEdit, PersistedAssetData};
pub use error::FacilityDomainError;
pub use ids::{AssetId, LocationId};
pub use location::{Location, LocationEdit, PersistedLocationData};
