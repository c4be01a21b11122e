use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce;
use crate::schema::{PLAYER_ID_FIELD, PLAYER_NAME_FIELD, TEAM_NAME_FIELD};

/// One row as returned by a data endpoint. Field names are opaque (`"Pas%"`, `"KazanTop/90"`).
pub type RawRecord = Map<String, Value>;

/// A watch-listed player's statistics row with its graphic row folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub join_key: String,
    pub fields: RawRecord,
    #[serde(default)]
    pub selected: bool,
}

impl MergedRecord {
    /// Declared numeric fields are already coerced, so this only falls back for unknown names.
    pub fn number(&self, field: &str) -> f64 {
        coerce::to_number_or_default(self.fields.get(field), 0.0)
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        self.text(PLAYER_NAME_FIELD)
            .unwrap_or_else(|| self.join_key.clone())
    }

    pub fn team_name(&self) -> String {
        self.text(TEAM_NAME_FIELD).unwrap_or_default()
    }

    pub fn player_id(&self) -> Option<f64> {
        self.fields.get(PLAYER_ID_FIELD).and_then(coerce::to_number)
    }
}
