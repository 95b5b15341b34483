pub mod amalgam;
pub mod region;

pub use amalgam::Amalgamator;
pub use region::{extract_region, RegionMarkers};
