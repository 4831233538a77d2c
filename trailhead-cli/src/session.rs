use crate::commands::{Command, HELP};
use crate::map;
use shared::{Error, Result};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::{error, info};
use trailhead::{GeoResolution, PlaceRecord, SitePipeline, Vicinity};

const UNKNOWN_REGION: &str = "I didn't recognize that state abbreviation. Please try again.";
const NO_RESULT_SET: &str =
    "This command is not valid now because there is no active result set.";
const UNRECOGNIZED_NUMBER: &str = "I didn't recognize that number. Please try again.";
const INVALID_NUMBER: &str = "This number is not valid. Please try again.";
const NOT_UNDERSTOOD: &str = "I didn't understand that. Please try again.";

/// What the last successful command left on screen.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Idle,
    Region {
        name: String,
        sites: Vec<PlaceRecord>,
    },
    Nearby {
        name: String,
        sites: Vec<PlaceRecord>,
        vicinity: Vicinity,
    },
}

impl View {
    /// The numbered region listing that `nearby` selections refer to.
    fn sites(&self) -> Option<&[PlaceRecord]> {
        match self {
            View::Idle => None,
            View::Region { sites, .. } | View::Nearby { sites, .. } => Some(sites),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit,
}

pub struct Session {
    pipeline: SitePipeline,
    map_dir: PathBuf,
    view: View,
}

impl Session {
    pub fn new(pipeline: SitePipeline, map_dir: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            map_dir: map_dir.into(),
            view: View::Idle,
        }
    }

    /// Run one command. Failures are reported in the returned text and leave
    /// the current view untouched.
    pub async fn handle(&mut self, command: Command) -> Outcome {
        let result = match command {
            Command::Exit => return Outcome::Exit,
            Command::Empty => Ok(String::new()),
            Command::Help => Ok(HELP.to_string()),
            Command::Unknown(word) => {
                info!("Unrecognized command '{}'", word);
                Ok(NOT_UNDERSTOOD.to_string())
            }
            Command::List(code) => self.list(code.as_deref()).await,
            Command::Nearby(selection) => self.nearby(selection.as_deref()).await,
            Command::Map => self.map().await,
        };

        match result {
            Ok(text) => Outcome::Continue(text),
            Err(Error::UnknownRegion(_)) => Outcome::Continue(UNKNOWN_REGION.to_string()),
            Err(Error::InvalidSelection { .. }) => Outcome::Continue(INVALID_NUMBER.to_string()),
            Err(e) => {
                error!("Command failed: {}", e);
                Outcome::Continue(format!("Something went wrong: {}", e))
            }
        }
    }

    async fn list(&mut self, code: Option<&str>) -> Result<String> {
        let Some(code) = code else {
            return Ok(UNKNOWN_REGION.to_string());
        };
        let name = self.pipeline.regions().get(code)?.name.clone();
        let sites = self.pipeline.list_region(code).await?;

        let mut text = format!("National Sites in {}", name);
        for (i, site) in sites.iter().enumerate() {
            let _ = write!(text, "\n{} {}", i + 1, site);
        }

        self.view = View::Region { name, sites };
        Ok(text)
    }

    async fn nearby(&mut self, selection: Option<&str>) -> Result<String> {
        let Some(sites) = self.view.sites() else {
            return Ok(NO_RESULT_SET.to_string());
        };
        let Some(number) = selection.and_then(|s| s.parse::<i64>().ok()) else {
            return Ok(UNRECOGNIZED_NUMBER.to_string());
        };
        let Ok(index) = usize::try_from(number) else {
            return Ok(INVALID_NUMBER.to_string());
        };

        let vicinity = self.pipeline.nearby_of_selection(sites, index).await?;
        let anchor = &vicinity.anchor;

        let text = match vicinity.resolution {
            GeoResolution::Unresolved => format!(
                "Sorry, I can't find GPS coordinates for {} {}.",
                anchor.name, anchor.category
            ),
            GeoResolution::Resolved(_) => {
                let mut text = format!("Places near {} {}", anchor.name, anchor.category);
                for (i, place) in vicinity.places.iter().enumerate() {
                    let _ = write!(text, "\n{} {}", i + 1, place);
                }
                text
            }
        };

        let view = std::mem::replace(&mut self.view, View::Idle);
        self.view = match view {
            View::Region { name, sites } | View::Nearby { name, sites, .. } => {
                View::Nearby {
                    name,
                    sites,
                    vicinity,
                }
            }
            View::Idle => View::Idle,
        };
        Ok(text)
    }

    async fn map(&self) -> Result<String> {
        let (title, figure) = match &self.view {
            View::Idle => return Ok(NO_RESULT_SET.to_string()),
            View::Region { name, sites, .. } => {
                let title = format!("National Sites in {}", name);
                let figure = map::region_figure(&title, sites);
                (title, figure)
            }
            View::Nearby { vicinity, .. } => {
                let title = format!(
                    "Places near {} {}",
                    vicinity.anchor.category, vicinity.anchor.name
                );
                let figure = map::vicinity_figure(&title, vicinity);
                (title, figure)
            }
        };

        let Some(figure) = figure else {
            return Ok("There is nothing with GPS coordinates to put on a map.".to_string());
        };
        let path = map::write_figure(&self.map_dir, &title, &figure).await?;
        info!("Wrote map '{}' to {}", title, path.display());
        Ok(format!("Map written to {}", path.display()))
    }
}
