//! The text/area filter producing the visible subset of the dataset.

use crate::types::Centre;

/// Computes the Visible Set: centres matching the query and the area filter,
/// in dataset order.
///
/// The query matches case-insensitively as a substring of the centre name or
/// the raw area label. The area filter compares exactly against the trimmed
/// label (blank labels count as `"Unknown"`); `None` disables it. The
/// function is pure and O(n), cheap enough to rerun on every keystroke.
pub fn visible<'a>(centres: &'a [Centre], query: &str, area: Option<&str>) -> Vec<&'a Centre> {
    let needle = query.to_lowercase();
    centres
        .iter()
        .filter(|centre| matches_query(centre, &needle) && matches_area(centre, area))
        .collect()
}

fn matches_query(centre: &Centre, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    centre.name.to_lowercase().contains(needle)
        || centre
            .area
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(needle)
}

fn matches_area(centre: &Centre, area: Option<&str>) -> bool {
    match area {
        Some(wanted) => centre.area_label() == wanted,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;
    use pretty_assertions::assert_eq;

    fn centre(id: i64, name: &str, area: Option<&str>) -> Centre {
        Centre {
            id,
            code: format!("C{id}"),
            name: name.into(),
            area: area.map(String::from),
            coords: Coordinate::new(23.0, 91.4),
        }
    }

    fn ids(set: &[&Centre]) -> Vec<i64> {
        set.iter().map(|c| c.id).collect()
    }

    #[test]
    fn no_filters_returns_everything_in_order() {
        let centres = [
            centre(1, "North School", Some("North")),
            centre(2, "South Hall", Some("South")),
        ];
        assert_eq!(ids(&visible(&centres, "", None)), [1, 2]);
    }

    #[test]
    fn query_matches_name_or_area_case_insensitively() {
        let centres = [
            centre(1, "North School", Some("Uptown")),
            centre(2, "Riverside Hall", Some("south bank")),
            centre(3, "Hilltop", Some("Peak")),
        ];
        assert_eq!(ids(&visible(&centres, "school", None)), [1]);
        assert_eq!(ids(&visible(&centres, "SOUTH", None)), [2]);
        assert_eq!(ids(&visible(&centres, "zzz", None)), Vec::<i64>::new());
    }

    #[test]
    fn area_filter_compares_trimmed_labels() {
        let centres = [
            centre(1, "A", Some(" North ")),
            centre(2, "B", Some("South")),
            centre(3, "C", None),
        ];
        assert_eq!(ids(&visible(&centres, "", Some("North"))), [1]);
        assert_eq!(ids(&visible(&centres, "", Some("Unknown"))), [3]);
    }

    #[test]
    fn filters_combine_with_and() {
        let centres = [
            centre(1, "North School", Some("North")),
            centre(2, "North Annex", Some("South")),
        ];
        assert_eq!(ids(&visible(&centres, "north", Some("South"))), [2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let centres = [
            centre(1, "North School", Some("North")),
            centre(2, "South Hall", Some("South")),
        ];
        let once = ids(&visible(&centres, "north", None));
        let again: Vec<Centre> = visible(&centres, "north", None)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(ids(&visible(&again, "north", None)), once);
    }
}
