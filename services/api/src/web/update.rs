//! services/api/src/web/update.rs
//!
//! Projects an arbitrary PATCH body onto the fields a client may change.

use lecture_tracker_core::domain::LectureUpdate;
use serde_json::Value;

/// Builds a `LectureUpdate` from a JSON body.
///
/// Only `listened`, `bookmarked`, `notes` and `summary` are read, and each only
/// when it holds the expected JSON type. Everything else is ignored rather than
/// rejected, including bodies that are not objects at all.
pub fn update_from_json(body: &Value) -> LectureUpdate {
    let Some(fields) = body.as_object() else {
        return LectureUpdate::default();
    };
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    LectureUpdate {
        listened: fields.get("listened").and_then(Value::as_bool),
        bookmarked: fields.get("bookmarked").and_then(Value::as_bool),
        notes: text("notes"),
        summary: text("summary"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognized_fields_are_taken() {
        let update = update_from_json(&json!({
            "listened": true,
            "bookmarked": false,
            "notes": "Verse 13 on the soul",
            "summary": ""
        }));
        assert_eq!(
            update,
            LectureUpdate {
                listened: Some(true),
                bookmarked: Some(false),
                notes: Some("Verse 13 on the soul".to_string()),
                summary: Some(String::new()),
            }
        );
    }

    #[test]
    fn wrong_types_are_dropped() {
        let update = update_from_json(&json!({
            "listened": "yes",
            "bookmarked": 1,
            "notes": null,
            "summary": ["a"]
        }));
        assert!(update.is_empty());
    }

    #[test]
    fn unknown_fields_and_non_objects_are_ignored() {
        assert!(update_from_json(&json!({"foo": "bar", "id": 7, "title": "x"})).is_empty());
        assert!(update_from_json(&json!([{"listened": true}])).is_empty());
        assert!(update_from_json(&Value::Null).is_empty());
    }
}
