//! Listing collaborator: turns a state's park listing page (and each site's
//! detail page) into `PlaceRecord`s. Pages are fetched through the request
//! cache like every other outbound call.

pub mod detail;
pub mod listing;
pub mod markup;

use async_trait::async_trait;
use shared::Result;
use tracing::{debug, info};
use trailhead::ports::SiteSource;
use trailhead::{CacheNamespace, PlaceRecord, RequestCache};

pub use detail::parse_address;
pub use listing::{ListingEntry, parse_listing};

#[derive(Clone, Debug)]
pub struct NpsSiteSource {
    requests: RequestCache,
    base_url: String,
}

impl NpsSiteSource {
    pub fn new(requests: RequestCache, base_url: impl Into<String>) -> Self {
        Self {
            requests,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn listing_url(&self, region_code: &str) -> String {
        format!(
            "{}/state/{}/index.htm",
            self.base_url,
            region_code.trim().to_ascii_lowercase()
        )
    }

    pub fn detail_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            format!("{}index.htm", href)
        } else {
            format!("{}{}index.htm", self.base_url, href)
        }
    }

    async fn record_for(&self, entry: ListingEntry) -> Result<PlaceRecord> {
        let record = PlaceRecord::new(entry.name, entry.category, entry.description);
        let Some(href) = entry.href else {
            return Ok(record);
        };

        let url = self.detail_url(&href);
        let html = self
            .requests
            .fetch_cached(CacheNamespace::SiteDetail, &url, None)
            .await?;

        let record = record.with_url(url);
        Ok(match parse_address(&html) {
            Some(address) => record.with_address(address),
            None => {
                debug!("No address on detail page for '{}'", record.name);
                record
            }
        })
    }
}

#[async_trait]
impl SiteSource for NpsSiteSource {
    async fn sites_for_region(&self, region_code: &str) -> Result<Vec<PlaceRecord>> {
        let url = self.listing_url(region_code);
        let html = self
            .requests
            .fetch_cached(CacheNamespace::StateListing, &url, None)
            .await?;

        let entries = parse_listing(&html);
        info!("Found {} listed site(s) at {}", entries.len(), url);

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            records.push(self.record_for(entry).await?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use trailhead::Params;
    use trailhead::persistence::MemoryStore;
    use trailhead::ports::Fetcher;

    #[derive(Default)]
    struct Pages {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Fetcher for Pages {
        async fn fetch(&self, endpoint: &str, _params: Option<&Params>) -> Result<String> {
            self.requested.lock().unwrap().push(endpoint.to_string());
            self.pages
                .get(endpoint)
                .cloned()
                .ok_or_else(|| shared::Error::Request(format!("404 {}", endpoint)))
        }
    }

    const LISTING: &str = r#"<ul id="list_parks">
        <li class="clearfix"><h2>National Park</h2><h3><a href="/isro/">Isle Royale</a></h3><p>Island.</p></li>
        <li class="clearfix"><h2>Heritage Area</h2><h3>Motor Cities</h3><p>Cars.</p></li>
    </ul>"#;
    const DETAIL: &str = r#"<span itemprop="streetAddress">800 East Lakeshore Drive</span>
        <span itemprop="addressLocality">Houghton</span>
        <span itemprop="addressRegion">MI</span>
        <span itemprop="postalCode">49931</span>"#;

    fn source(pages: Pages) -> (NpsSiteSource, Arc<Pages>, Arc<MemoryStore>) {
        let pages = Arc::new(pages);
        let store = Arc::new(MemoryStore::new());
        let requests = RequestCache::new(store.clone(), pages.clone());
        (NpsSiteSource::new(requests, "https://www.nps.test/"), pages, store)
    }

    #[test]
    fn test_urls() {
        let (source, _, _) = source(Pages::default());
        assert_eq!(source.listing_url("MI"), "https://www.nps.test/state/mi/index.htm");
        assert_eq!(source.detail_url("/isro/"), "https://www.nps.test/isro/index.htm");
        assert_eq!(
            source.detail_url("https://elsewhere.test/x/"),
            "https://elsewhere.test/x/index.htm"
        );
    }

    #[tokio::test]
    async fn test_sites_for_region() {
        let mut pages = Pages::default();
        pages.pages.insert(
            "https://www.nps.test/state/mi/index.htm".to_string(),
            LISTING.to_string(),
        );
        pages.pages.insert(
            "https://www.nps.test/isro/index.htm".to_string(),
            DETAIL.to_string(),
        );
        let (source, pages, store) = source(pages);

        let records = source.sites_for_region("mi").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].to_string(),
            "Isle Royale (National Park): 800 East Lakeshore Drive, Houghton, MI 49931"
        );
        assert_eq!(records[0].url.as_deref(), Some("https://www.nps.test/isro/index.htm"));
        assert_eq!(records[1].name, "Motor Cities");
        assert_eq!(records[1].address, None);

        // listing and detail pages land in their own namespaces
        assert_eq!(store.snapshot(CacheNamespace::StateListing).await.len(), 1);
        assert_eq!(store.snapshot(CacheNamespace::SiteDetail).await.len(), 1);

        // a second pass is served entirely from the cache
        source.sites_for_region("MI").await.unwrap();
        assert_eq!(pages.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_detail_page_fails_the_listing() {
        let mut pages = Pages::default();
        pages.pages.insert(
            "https://www.nps.test/state/mi/index.htm".to_string(),
            LISTING.to_string(),
        );
        let (source, _, _) = source(pages);

        let err = source.sites_for_region("MI").await.unwrap_err();
        assert!(matches!(err, shared::Error::Request(_)));
    }
}
