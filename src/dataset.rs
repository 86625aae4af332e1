//! Geocoded centre dataset: loading, id lookup, area index, nearest search.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::error::Error;
use crate::geocode;
use crate::types::{Centre, CentreId, Coordinate, RawCentre};

/// Backend returning raw centre rows, ordered by short code ascending.
pub trait DatasetProvider {
    /// Fetches every centre row, or an error when the backend is unreachable.
    fn list_records(&mut self) -> Result<Vec<RawCentre>, Error>;
}

/// The in-memory set of geocoded centres.
///
/// Rows whose location cannot be resolved are dropped at construction; they
/// never appear in the list view, on the map, or in nearest-neighbor search.
/// Dataset order (the provider's code order) is preserved.
#[derive(Debug, Default)]
pub struct Dataset {
    centres: Vec<Centre>,
    index: FxHashMap<CentreId, usize>,
    areas: Vec<String>,
}

impl Dataset {
    /// Geocodes the given rows and builds the id and area indexes.
    pub fn from_rows(rows: Vec<RawCentre>) -> Self {
        let total = rows.len();
        let centres: Vec<Centre> = rows
            .into_iter()
            .filter_map(|row| match geocode::extract(&row) {
                Some(coords) => Some(Centre {
                    id: row.id,
                    code: row.code,
                    name: row.name,
                    area: row.area,
                    coords,
                }),
                None => {
                    debug!(id = row.id, code = %row.code, "dropping centre with unresolvable location");
                    None
                }
            })
            .collect();

        let index = centres
            .iter()
            .enumerate()
            .map(|(pos, centre)| (centre.id, pos))
            .collect();

        let mut areas: Vec<String> = centres
            .iter()
            .map(|centre| centre.area_label().to_string())
            .collect();
        areas.sort();
        areas.dedup();

        info!(
            geocoded = centres.len(),
            dropped = total - centres.len(),
            areas = areas.len(),
            "dataset loaded"
        );

        Self {
            centres,
            index,
            areas,
        }
    }

    /// All geocoded centres in dataset order.
    pub fn centres(&self) -> &[Centre] {
        &self.centres
    }

    /// Distinct trimmed area labels, sorted ascending.
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// Looks up a centre by id.
    pub fn get(&self, id: CentreId) -> Option<&Centre> {
        self.index.get(&id).map(|&pos| &self.centres[pos])
    }

    /// Number of geocoded centres.
    pub fn len(&self) -> usize {
        self.centres.len()
    }

    /// Whether the dataset holds no geocoded centres.
    pub fn is_empty(&self) -> bool {
        self.centres.is_empty()
    }

    /// The centre nearest to `origin` by great-circle distance, or `None` on
    /// an empty dataset.
    ///
    /// The search always covers the whole dataset, not just the currently
    /// filtered view; ties go to the first-encountered centre. Centres whose
    /// distance comes out NaN (a half-valid geocoded pair) never win.
    pub fn nearest(&self, origin: Coordinate) -> Option<&Centre> {
        let mut best: Option<&Centre> = None;
        let mut min = f64::INFINITY;
        for centre in &self.centres {
            let d = origin.distance_to(&centre.coords);
            if d < min {
                best = Some(centre);
                min = d;
            }
        }
        best
    }
}
