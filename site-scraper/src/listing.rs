use crate::markup::{element_inner, first_element, first_href, text_of};
use regex::Regex;
use std::sync::LazyLock;

static LIST_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(\w+)[^>]*\bid\s*=\s*["']list_parks["'][^>]*>"#).expect("valid regex")
});
static ITEM_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(\w+)[^>]*\bclass\s*=\s*["'][^"']*\bclearfix\b[^"']*["'][^>]*>"#)
        .expect("valid regex")
});

/// One site as it appears on a state listing page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingEntry {
    pub category: String,
    pub name: String,
    pub description: String,
    pub href: Option<String>,
}

/// Entries of the `list_parks` container, in page order. Only markup inside
/// the container counts, and each item ends at its own closing tag. Items
/// without a name heading are skipped; other missing fields are left empty.
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    let Some(container) = LIST_CONTAINER.captures(html) else {
        return Vec::new();
    };
    let Some(open) = container.get(0) else {
        return Vec::new();
    };
    let body = element_inner(html, &container[1], open.end());

    ITEM_START
        .captures_iter(body)
        .filter_map(|item| {
            let open = item.get(0)?;
            parse_item(element_inner(body, &item[1], open.end()))
        })
        .collect()
}

fn parse_item(item: &str) -> Option<ListingEntry> {
    let heading = first_element(item, "h3")?;
    let name = text_of(heading).trim().to_string();
    if name.is_empty() {
        return None;
    }

    Some(ListingEntry {
        category: first_element(item, "h2")
            .map(|h2| text_of(h2).trim().to_string())
            .unwrap_or_default(),
        name,
        description: first_element(item, "p")
            .map(|p| text_of(p).trim().to_string())
            .unwrap_or_default(),
        href: first_href(heading),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <ul class="nav"><li class="clearfix"><h3>Not a park</h3></li></ul>
  <ul id="list_parks">
    <li class="clearfix" id="asset-1">
      <div class="col-md-9 list_left">
        <h2>National Park</h2>
        <h3><a href="/isro/">Isle Royale</a></h3>
        <h4>Houghton, MI</h4>
        <p>
          Explore a rugged, isolated island.
        </p>
      </div>
      <div class="list_right"><ul><li><a href="/isro/planyourvisit/">Plan</a></li></ul></div>
    </li>
    <li class="clearfix" id="asset-2">
      <h2>National Lakeshore</h2>
      <h3><a href="/piro/">Pictured Rocks</a></h3>
    </li>
    <li class="clearfix">
      <h2>Heading only</h2>
    </li>
    <li class="item clearfix last">
      <h3>Keweenaw &amp; Copper Country</h3>
      <p>Mining history.</p>
    </li>
  </ul>
</body></html>
"#;

    #[test]
    fn test_parse_listing_entries_in_order() {
        let entries = parse_listing(PAGE);

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            ListingEntry {
                category: "National Park".to_string(),
                name: "Isle Royale".to_string(),
                description: "Explore a rugged, isolated island.".to_string(),
                href: Some("/isro/".to_string()),
            }
        );
        assert_eq!(entries[1].name, "Pictured Rocks");
        assert_eq!(entries[1].description, "");
        assert_eq!(entries[2].name, "Keweenaw & Copper Country");
        assert_eq!(entries[2].category, "");
        assert_eq!(entries[2].href, None);
    }

    #[test]
    fn test_markup_after_the_container_is_ignored() {
        let html = r#"<ul id="list_parks">
            <li class="clearfix"><h2>National Park</h2><h3><a href="/isro/">Isle Royale</a></h3></li>
        </ul>
        <footer><p>Footer blurb</p><div class="clearfix"><h3>Stay Connected</h3></div></footer>"#;

        let entries = parse_listing(html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Isle Royale");
        assert_eq!(entries[0].description, "");
    }

    #[test]
    fn test_page_without_container() {
        assert!(parse_listing("<html><li class=\"clearfix\"><h3>x</h3></li></html>").is_empty());
    }
}
