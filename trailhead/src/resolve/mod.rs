pub mod boundary;
pub mod geocode;
pub mod nearby;
pub mod pipeline;

pub use boundary::RegionTable;
pub use geocode::GeocodeResolver;
pub use nearby::{NEARBY_RADIUS, NearbySearch};
pub use pipeline::{SitePipeline, Vicinity};
