//! Name normalization and the geometry-driven left join.

use super::geometry::GeometryRecord;
use super::records::StateRecord;
use std::collections::HashMap;

/// Join key: trimmed and uppercased. No other folding is applied.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// A boundary feature with its matching table row, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub geometry: GeometryRecord,
    pub state: Option<StateRecord>,
}

impl JoinedRecord {
    pub fn isa(&self) -> Option<f64> {
        self.state.as_ref().and_then(|s| s.isa)
    }
}

/// Left join of geometries to state rows on the normalized name.
///
/// Output has exactly one entry per geometry, in geometry order. When several
/// rows share a key the first one is used.
pub fn left_join(geometries: Vec<GeometryRecord>, states: &[StateRecord]) -> Vec<JoinedRecord> {
    let mut by_key: HashMap<String, &StateRecord> = HashMap::with_capacity(states.len());
    for state in states {
        by_key.entry(normalize_key(&state.name)).or_insert(state);
    }

    let joined: Vec<JoinedRecord> = geometries
        .into_iter()
        .map(|geometry| {
            let state = geometry
                .name
                .as_deref()
                .and_then(|name| by_key.get(&normalize_key(name)))
                .map(|s| (*s).clone());
            JoinedRecord { geometry, state }
        })
        .collect();

    let matched = joined.iter().filter(|r| r.state.is_some()).count();
    log::debug!(
        "Joined {} of {} geometries to {} table rows",
        matched,
        joined.len(),
        states.len()
    );

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn geometry(name: &str, abbreviation: &str) -> GeometryRecord {
        GeometryRecord {
            name: Some(name.to_string()),
            abbreviation: abbreviation.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ]]),
        }
    }

    #[test]
    fn normalize_key_trims_and_uppercases_unicode() {
        assert_eq!(normalize_key("  são paulo "), "SÃO PAULO");
        assert_eq!(normalize_key("SÃO PAULO"), "SÃO PAULO");
        assert_eq!(normalize_key("São Paulo"), "SÃO PAULO");
    }

    #[test]
    fn spelling_variants_all_match_the_same_geometry() {
        for name in ["  são paulo ", "SÃO PAULO", "São Paulo"] {
            let states = vec![StateRecord::new(name, Some(0.6))];
            let joined = left_join(vec![geometry("São Paulo", "SP")], &states);
            assert_eq!(joined[0].isa(), Some(0.6), "no match for {name:?}");
        }
    }

    #[test]
    fn keeps_every_geometry_in_geometry_order() {
        let geometries = vec![
            geometry("Acre", "AC"),
            geometry("Bahia", "BA"),
            geometry("Ceará", "CE"),
        ];
        let states = vec![
            StateRecord::new("Ceará", Some(0.3)),
            StateRecord::new("Acre", Some(0.8)),
            StateRecord::new("Goiás", Some(0.5)),
        ];

        let joined = left_join(geometries, &states);

        assert_eq!(joined.len(), 3);
        let names: Vec<_> = joined.iter().map(|r| r.geometry.name.as_deref()).collect();
        assert_eq!(names, [Some("Acre"), Some("Bahia"), Some("Ceará")]);
        assert_eq!(joined[0].isa(), Some(0.8));
        assert!(joined[1].state.is_none());
        assert_eq!(joined[2].isa(), Some(0.3));
    }

    #[test]
    fn duplicate_rows_do_not_duplicate_geometries() {
        let states = vec![
            StateRecord::new("Acre", Some(0.8)),
            StateRecord::new("ACRE", Some(0.1)),
        ];
        let joined = left_join(vec![geometry("Acre", "AC")], &states);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].isa(), Some(0.8));
    }

    #[test]
    fn no_fuzzy_matching() {
        let states = vec![StateRecord::new("Sao Paulo", Some(0.6))];
        let joined = left_join(vec![geometry("São Paulo", "SP")], &states);
        assert!(joined[0].state.is_none());
    }

    #[test]
    fn unnamed_geometry_is_kept_but_never_matches() {
        let mut unnamed = geometry("", "XX");
        unnamed.name = None;
        let states = vec![StateRecord::new("", Some(0.4)), StateRecord::new("Acre", Some(0.8))];

        let joined = left_join(vec![geometry("Acre", "AC"), unnamed], &states);

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].isa(), Some(0.8));
        assert!(joined[1].state.is_none());
    }
}
