use serde_json::{json, Value};
use shared::{Error, Result};
use std::path::{Path, PathBuf};
use trailhead::{Coordinate, PlaceRecord, Vicinity};

/// Share of the larger coordinate span added on every side of the view.
const AXIS_PADDING: f64 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub center: Coordinate,
    pub lat_axis: [f64; 2],
    pub lon_axis: [f64; 2],
}

/// View centered on the points' bounding box, padded by 10% of its larger
/// span. `None` for an empty point set.
pub fn frame(points: &[Coordinate]) -> Option<Frame> {
    let first = points.first()?;
    let (mut min_lat, mut max_lat) = (first.lat, first.lat);
    let (mut min_lon, mut max_lon) = (first.lon, first.lon);
    for point in &points[1..] {
        min_lat = min_lat.min(point.lat);
        max_lat = max_lat.max(point.lat);
        min_lon = min_lon.min(point.lon);
        max_lon = max_lon.max(point.lon);
    }

    let padding = (max_lat - min_lat).abs().max((max_lon - min_lon).abs()) * AXIS_PADDING;
    Some(Frame {
        center: Coordinate::new((max_lat + min_lat) / 2.0, (max_lon + min_lon) / 2.0),
        lat_axis: [min_lat - padding, max_lat + padding],
        lon_axis: [min_lon - padding, max_lon + padding],
    })
}

fn layout(title: &str, frame: &Frame) -> Value {
    json!({
        "title": title,
        "geo": {
            "scope": "usa",
            "projection": { "type": "albers usa" },
            "showland": true,
            "landcolor": "rgb(250, 250, 250)",
            "subunitcolor": "rgb(100, 217, 217)",
            "countrycolor": "rgb(217, 100, 217)",
            "lataxis": { "range": frame.lat_axis },
            "lonaxis": { "range": frame.lon_axis },
            "center": { "lat": frame.center.lat, "lon": frame.center.lon },
            "countrywidth": 3,
            "subunitwidth": 3
        }
    })
}

fn trace(name: Option<&str>, points: &[(String, Coordinate)], marker: Value) -> Value {
    let mut trace = json!({
        "type": "scattergeo",
        "locationmode": "USA-states",
        "lat": points.iter().map(|(_, c)| c.lat).collect::<Vec<_>>(),
        "lon": points.iter().map(|(_, c)| c.lon).collect::<Vec<_>>(),
        "text": points.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
        "mode": "markers",
        "marker": marker
    });
    if let Some(name) = name {
        trace["name"] = json!(name);
    }
    trace
}

/// Scatter figure of the accepted places of a region. Places without a
/// coordinate are left off.
pub fn region_figure(title: &str, sites: &[PlaceRecord]) -> Option<Value> {
    let points: Vec<(String, Coordinate)> = sites
        .iter()
        .filter_map(|site| site.coordinate.map(|c| (site.name.clone(), c)))
        .collect();
    let coordinates: Vec<Coordinate> = points.iter().map(|(_, c)| *c).collect();
    let frame = frame(&coordinates)?;

    Some(json!({
        "data": [trace(None, &points, json!({ "size": 8, "symbol": "star" }))],
        "layout": layout(title, &frame)
    }))
}

/// Anchor as a red star, its neighbours as blue circles. `None` when the
/// anchor could not be placed.
pub fn vicinity_figure(title: &str, vicinity: &Vicinity) -> Option<Value> {
    let anchor = vicinity.resolution.coordinate()?;
    let anchor_point = vec![(vicinity.anchor.name.clone(), anchor)];
    let nearby_points: Vec<(String, Coordinate)> = vicinity
        .places
        .iter()
        .filter_map(|place| place.coordinate.map(|c| (place.name.clone(), c)))
        .collect();

    let mut coordinates: Vec<Coordinate> = nearby_points.iter().map(|(_, c)| *c).collect();
    coordinates.push(anchor);
    let frame = frame(&coordinates)?;

    Some(json!({
        "data": [
            trace(
                Some(&vicinity.anchor.name),
                &anchor_point,
                json!({ "size": 20, "symbol": "star", "color": "red" })
            ),
            trace(
                Some("nearby places"),
                &nearby_points,
                json!({ "size": 8, "symbol": "circle", "color": "blue" })
            )
        ],
        "layout": layout(title, &frame)
    }))
}

/// "Places near National Park Isle Royale" -> "Places_near_National_Park_Isle_Royale.json"
pub fn file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}.json", stem)
}

pub async fn write_figure(dir: &Path, title: &str, figure: &Value) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        Error::Internal(format!("Failed to create map directory {}: {}", dir.display(), e))
    })?;

    let path = dir.join(file_name(title));
    let json = serde_json::to_string_pretty(figure)
        .map_err(|e| Error::Internal(format!("Failed to serialize figure: {}", e)))?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| Error::Internal(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}
