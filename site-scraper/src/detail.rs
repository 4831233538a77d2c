use crate::markup::text_of;
use regex::Regex;
use std::sync::LazyLock;
use trailhead::PostalAddress;

static ITEMPROP_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*\bitemprop\s*=\s*["']([^"']*)["'][^>]*>(.*?)</span\s*>"#)
        .expect("valid regex")
});

/// Text of the first `<span itemprop="{prop}">`.
fn itemprop(html: &str, prop: &str) -> Option<String> {
    ITEMPROP_SPAN
        .captures_iter(html)
        .find(|caps| &caps[1] == prop)
        .map(|caps| text_of(&caps[2]))
}

/// Postal address from the `itemprop` spans of a detail page. `None` when the
/// page carries none of them; individual missing spans stay empty.
pub fn parse_address(html: &str) -> Option<PostalAddress> {
    let street = itemprop(html, "streetAddress");
    let city = itemprop(html, "addressLocality");
    let state = itemprop(html, "addressRegion");
    let zip = itemprop(html, "postalCode");

    if street.is_none() && city.is_none() && state.is_none() && zip.is_none() {
        return None;
    }

    let clean = |field: Option<String>| field.map(|v| v.trim().to_string()).unwrap_or_default();
    Some(PostalAddress {
        street: street
            .map(|v| v.trim().replace('\n', ""))
            .unwrap_or_default(),
        city: clean(city),
        state: clean(state),
        zip: clean(zip),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_address() {
        let html = r#"
            <div itemprop="address" itemscope>
              <span itemprop="streetAddress">
                800 East Lakeshore Drive
              </span>
              <span itemprop="addressLocality">Houghton</span>,
              <span itemprop="addressRegion">MI</span>
              <span itemprop="postalCode">49931  </span>
            </div>"#;

        let address = parse_address(html).unwrap();
        assert_eq!(address.street, "800 East Lakeshore Drive");
        assert_eq!(address.city, "Houghton");
        assert_eq!(address.state, "MI");
        assert_eq!(address.zip, "49931");
    }

    #[test]
    fn test_street_lines_are_joined() {
        let html = "<span itemprop=\"streetAddress\">PO Box 40\n9922 Front Street</span>";
        let address = parse_address(html).unwrap();
        assert_eq!(address.street, "PO Box 409922 Front Street");
        assert_eq!(address.city, "");
    }

    #[test]
    fn test_other_itemprops_are_skipped() {
        let html = r#"<span itemprop="telephone">906-482-0984</span>
            <span itemprop="postalCode">49931</span>"#;
        let address = parse_address(html).unwrap();
        assert_eq!(address.zip, "49931");
        assert_eq!(address.street, "");
    }

    #[test]
    fn test_page_without_address() {
        assert_eq!(parse_address("<html><p>Closed</p></html>"), None);
    }
}
