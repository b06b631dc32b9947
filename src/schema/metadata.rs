use serde_json::{Map, Value};

/// Cross-references carried by a notification, normalized from whatever shape
/// the server sent (JSON object, JSON encoded as a string, or nothing).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub kind: Option<String>,
    pub task_id: Option<String>,
    pub station_id: Option<String>,
    pub assign_id: Option<String>,
    pub attendance_id: Option<String>,
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn from_raw(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Object(map)) => Self::from_map(map.clone()),
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Self::from_map(map),
                _ => Metadata::default(),
            },
            _ => Metadata::default(),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        Metadata {
            kind: take_string(&mut map, "type"),
            task_id: take_string(&mut map, "task_id"),
            station_id: take_string(&mut map, "station_id"),
            assign_id: take_string(&mut map, "assign_id"),
            attendance_id: take_string(&mut map, "attendance_id"),
            extra: map,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.task_id.is_none()
            && self.station_id.is_none()
            && self.assign_id.is_none()
            && self.attendance_id.is_none()
            && self.extra.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        let known = [
            ("type", &self.kind),
            ("task_id", &self.task_id),
            ("station_id", &self.station_id),
            ("assign_id", &self.assign_id),
            ("attendance_id", &self.attendance_id),
        ];
        for (key, value) in known {
            if let Some(v) = value {
                map.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        Value::Object(map)
    }
}

// Ids arrive as strings from the API but numbers are tolerated. Empty strings
// count as absent so that routing falls through to the id-less destination.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(_)) | Some(Value::Null) | None => None,
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
    }
}
