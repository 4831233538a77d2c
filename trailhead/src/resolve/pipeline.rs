use crate::domain::{GeoResolution, NearbyPlaceRecord, PlaceRecord};
use crate::ports::SiteSource;
use crate::resolve::{GeocodeResolver, NearbySearch, RegionTable};
use shared::{Error, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A selected place together with what was found around it.
#[derive(Clone, Debug, PartialEq)]
pub struct Vicinity {
    pub anchor: PlaceRecord,
    pub resolution: GeoResolution,
    /// Empty when the anchor could not be placed.
    pub places: Vec<NearbyPlaceRecord>,
}

/// Composes listing, geocoding, the region filter and nearby search.
/// Places are processed one at a time, in listing order.
#[derive(Clone)]
pub struct SitePipeline {
    sites: Arc<dyn SiteSource>,
    geocoder: GeocodeResolver,
    nearby: NearbySearch,
    regions: Arc<RegionTable>,
}

impl SitePipeline {
    pub fn new(
        sites: Arc<dyn SiteSource>,
        geocoder: GeocodeResolver,
        nearby: NearbySearch,
        regions: Arc<RegionTable>,
    ) -> Self {
        Self {
            sites,
            geocoder,
            nearby,
            regions,
        }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Listed places for a region that geocode to a point inside its bounds,
    /// in listing order. Returned records carry the resolved coordinate.
    ///
    /// An unknown region fails before anything is fetched. A network failure
    /// on any place aborts the whole pass.
    pub async fn list_region(&self, region_code: &str) -> Result<Vec<PlaceRecord>> {
        let region_name = self.regions.get(region_code)?.name.clone();
        let sites = self.sites.sites_for_region(region_code).await?;
        info!("Resolving {} listed site(s) in {}", sites.len(), region_name);

        let total = sites.len();
        let mut accepted = Vec::with_capacity(total);
        for site in sites {
            match self.locate(&site).await? {
                GeoResolution::Resolved(coordinate) => {
                    if self.regions.in_region(coordinate, region_code)? {
                        accepted.push(site.with_coordinate(coordinate));
                    } else {
                        debug!(
                            "Dropping '{}': ({}) lies outside {}",
                            site.name, coordinate, region_name
                        );
                    }
                }
                GeoResolution::Unresolved => {
                    info!("Could not place '{}' ({}), skipping", site.name, site.category);
                }
            }
        }

        info!(
            "Kept {} of {} site(s) in {}",
            accepted.len(),
            total,
            region_name
        );
        Ok(accepted)
    }

    /// Geocode a single place.
    pub async fn locate(&self, place: &PlaceRecord) -> Result<GeoResolution> {
        self.geocoder.resolve(&place.name, &place.category).await
    }

    /// Nearby places for the `index`-th (1-based) entry of a result set. The
    /// anchor is geocoded again rather than trusting a stored coordinate; when
    /// it cannot be placed no proximity search is issued.
    pub async fn nearby_of_selection(
        &self,
        results: &[PlaceRecord],
        index: usize,
    ) -> Result<Vicinity> {
        let anchor = index
            .checked_sub(1)
            .and_then(|i| results.get(i))
            .ok_or(Error::InvalidSelection {
                index,
                len: results.len(),
            })?;

        let resolution = self.locate(anchor).await?;
        let places = match resolution {
            GeoResolution::Resolved(center) => {
                self.nearby
                    .nearby_places(&anchor.name, &anchor.category, center)
                    .await?
            }
            GeoResolution::Unresolved => {
                info!("Could not place '{}', no nearby search", anchor.name);
                Vec::new()
            }
        };

        Ok(Vicinity {
            anchor: anchor.clone(),
            resolution,
            places,
        })
    }
}

impl fmt::Debug for SitePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SitePipeline")
            .field("sites", &"<dyn SiteSource>")
            .field("geocoder", &self.geocoder)
            .field("nearby", &self.nearby)
            .field("regions", &self.regions.len())
            .finish()
    }
}
