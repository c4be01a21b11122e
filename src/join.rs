use serde_json::Value;

use crate::coerce;
use crate::record::{MergedRecord, RawRecord};
use crate::schema::{PLAYER_ID_FIELD, PositionSchema};

/// Field layout the join needs; usually built from a [`PositionSchema`].
#[derive(Debug, Clone)]
pub struct JoinSpec<'a> {
    pub join_key_field: &'a str,
    pub numeric_fields: Vec<&'a str>,
    pub graphic_fields: &'a [&'a str],
    pub default_fields: &'a [(&'a str, &'a str)],
}

impl JoinSpec<'static> {
    pub fn for_schema(schema: &'static PositionSchema) -> Self {
        Self {
            join_key_field: schema.join_key_field,
            numeric_fields: schema.declared_numeric_fields(),
            graphic_fields: schema.graphic_fields,
            default_fields: schema.default_fields,
        }
    }
}

impl JoinSpec<'_> {
    fn default_source(&self, graphic_field: &str) -> Option<&str> {
        self.default_fields
            .iter()
            .find(|(graphic, _)| *graphic == graphic_field)
            .map(|(_, stat)| *stat)
    }
}

/// Merge statistics and graphic rows for each watched key, in watch-list order.
///
/// A key without a statistics row is dropped. A statistics row without a graphic
/// row keeps its graphic fields filled from the default map (or zero).
pub fn join_records(
    watched_keys: &[String],
    statistics: &[RawRecord],
    graphic: &[RawRecord],
    spec: &JoinSpec<'_>,
) -> Vec<MergedRecord> {
    let mut out = Vec::with_capacity(watched_keys.len());

    for key in watched_keys {
        let Some(stat) = statistics
            .iter()
            .find(|row| join_key_matches(row.get(spec.join_key_field), key))
        else {
            tracing::debug!(key = %key, field = spec.join_key_field, "no statistics row for watched key");
            continue;
        };

        let player_id = stat.get(PLAYER_ID_FIELD).and_then(coerce::to_number);
        let graphic_row = player_id.and_then(|pid| {
            graphic.iter().find(|row| {
                row.get(PLAYER_ID_FIELD)
                    .and_then(coerce::to_number)
                    .is_some_and(|other| other == pid)
            })
        });

        let mut fields = match graphic_row {
            Some(g) => {
                let mut merged = g.clone();
                merged.extend(stat.iter().map(|(k, v)| (k.clone(), v.clone())));
                merged
            }
            None => {
                tracing::debug!(key = %key, ?player_id, "no graphic row, using defaults");
                let mut merged = stat.clone();
                for field in spec.graphic_fields {
                    let fallback = spec
                        .default_source(field)
                        .map(|src| coerce::to_number_or_default(stat.get(src), 0.0))
                        .unwrap_or(0.0);
                    merged.insert((*field).to_string(), number_value(fallback));
                }
                merged
            }
        };

        fields.insert(spec.join_key_field.to_string(), Value::String(key.clone()));
        for field in &spec.numeric_fields {
            let n = coerce::to_number_or_default(fields.get(*field), 0.0);
            fields.insert((*field).to_string(), number_value(n));
        }

        out.push(MergedRecord {
            join_key: key.clone(),
            fields,
            selected: false,
        });
    }

    out
}

fn join_key_matches(value: Option<&Value>, key: &str) -> bool {
    value
        .and_then(coerce::to_key_text)
        .is_some_and(|text| text == key)
}

fn number_value(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{JoinSpec, join_records};
    use crate::record::RawRecord;

    fn row(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn spec() -> JoinSpec<'static> {
        JoinSpec {
            join_key_field: "blabla_stp",
            numeric_fields: vec!["player_id", "gol", "sutengllmeMB", "Eng/90", "Pas%"],
            graphic_fields: &["Eng/90", "Pas%"],
            default_fields: &[("Eng/90", "sutengllmeMB")],
        }
    }

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drops_unmatched_keys_and_defaults_missing_graphic() {
        let stats = vec![
            row(json!({"blabla_stp": "a", "player_id": 1, "gol": 2, "sutengllmeMB": 1.5})),
            row(json!({"blabla_stp": " c ", "player_id": "3", "gol": "4", "sutengllmeMB": 0.7})),
        ];
        let graphic = vec![row(json!({"player_id": 1, "Eng/90": 2.2, "Pas%": 81.0}))];

        let merged = join_records(&keys(&["a", "b", "c"]), &stats, &graphic, &spec());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].join_key, "a");
        assert_eq!(merged[0].number("Eng/90"), 2.2);
        assert_eq!(merged[0].number("Pas%"), 81.0);
        assert_eq!(merged[1].join_key, "c");
        assert_eq!(merged[1].number("Eng/90"), 0.7);
        assert_eq!(merged[1].number("Pas%"), 0.0);
        assert_eq!(merged[1].number("gol"), 4.0);
        assert!(merged.iter().all(|r| !r.selected));
    }

    #[test]
    fn statistics_fields_win_on_collision() {
        let stats = vec![row(json!({"blabla_stp": "a", "player_id": 1, "gol": 5}))];
        let graphic = vec![row(json!({"player_id": 1.0, "gol": 99, "Eng/90": 1}))];
        let merged = join_records(&keys(&["a"]), &stats, &graphic, &spec());
        assert_eq!(merged[0].number("gol"), 5.0);
        assert_eq!(merged[0].number("Eng/90"), 1.0);
    }

    #[test]
    fn declared_fields_are_always_numbers() {
        let stats = vec![row(json!({"blabla_stp": "a", "player_id": 1, "gol": "n/a"}))];
        let merged = join_records(&keys(&["a"]), &stats, &[], &spec());
        for field in ["player_id", "gol", "sutengllmeMB", "Eng/90", "Pas%"] {
            assert!(merged[0].value(field).is_some_and(Value::is_number), "{field}");
        }
        assert_eq!(merged[0].number("gol"), 0.0);
    }

    #[test]
    fn non_numeric_player_id_never_matches_graphic() {
        let stats = vec![row(json!({"blabla_stp": "a", "player_id": "x"}))];
        let graphic = vec![row(json!({"player_id": "x", "Pas%": 70}))];
        let merged = join_records(&keys(&["a"]), &stats, &graphic, &spec());
        assert_eq!(merged[0].number("Pas%"), 0.0);
    }

    #[test]
    fn whole_float_key_matches_its_integer_text() {
        let stats = vec![
            row(json!({"blabla_stp": 7.0, "player_id": 7, "gol": 3})),
            row(json!({"blabla_stp": 8.5, "player_id": 8})),
        ];
        let merged = join_records(&keys(&["7", "8.5"]), &stats, &[], &spec());
        let joined: Vec<&str> = merged.iter().map(|r| r.join_key.as_str()).collect();
        assert_eq!(joined, ["7", "8.5"]);
        assert_eq!(merged[0].number("gol"), 3.0);
    }
}
