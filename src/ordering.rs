use serde::{Deserialize, Serialize};

use crate::record::MergedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Sorted copy of `records`. Equal values keep their input order.
/// `field` is expected to be a declared numeric field.
pub fn sort_records(
    records: &[MergedRecord],
    field: &str,
    direction: SortDirection,
) -> Vec<MergedRecord> {
    let mut out = records.to_vec();
    // slice::sort_by is stable.
    out.sort_by(|a, b| {
        let (x, y) = (a.number(field), b.number(field));
        match direction {
            SortDirection::Asc => x.total_cmp(&y),
            SortDirection::Desc => y.total_cmp(&x),
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{SortDirection, sort_records};
    use crate::record::MergedRecord;

    fn rec(key: &str, v: f64) -> MergedRecord {
        MergedRecord {
            join_key: key.to_string(),
            fields: json!({"gol": v}).as_object().cloned().unwrap_or_default(),
            selected: false,
        }
    }

    fn keys(records: &[MergedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.join_key.as_str()).collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![rec("a", 2.0), rec("b", 1.0), rec("c", 2.0), rec("d", 1.0)];
        let desc = sort_records(&input, "gol", SortDirection::Desc);
        assert_eq!(keys(&desc), ["a", "c", "b", "d"]);
        let asc = sort_records(&input, "gol", SortDirection::Asc);
        assert_eq!(keys(&asc), ["b", "d", "a", "c"]);
        assert_eq!(keys(&input), ["a", "b", "c", "d"]);
    }

    #[test]
    fn idempotent_and_reversible() {
        let input = vec![rec("a", 3.0), rec("b", 9.0), rec("c", -1.0), rec("d", 4.5)];
        let once = sort_records(&input, "gol", SortDirection::Asc);
        let twice = sort_records(&once, "gol", SortDirection::Asc);
        assert_eq!(once, twice);
        let flipped = sort_records(&once, "gol", SortDirection::Desc);
        let mut reversed = once.clone();
        reversed.reverse();
        assert_eq!(flipped, reversed);
    }
}
