//! Lesson records and wire-shape normalization.

use crate::ids::LessonId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Placeholder subject for records that arrive without one.
pub const NO_SUBJECT: &str = "No subject";
/// Placeholder location.
pub const NO_LOCATION: &str = "Unknown";
/// Placeholder instructor.
pub const NO_INSTRUCTOR: &str = "TBD";
/// Image reference used when the record has none.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Lesson identifier as it appears on the wire; the service has returned both
/// string and numeric ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLessonId {
    Text(String),
    Number(i64),
}

impl RawLessonId {
    fn into_lesson_id(self) -> LessonId {
        match self {
            RawLessonId::Text(s) => LessonId::new(s),
            RawLessonId::Number(n) => LessonId::new(n.to_string()),
        }
    }
}

/// A lesson record as returned by the remote lesson service.
///
/// Everything but the identifier is optional or loosely typed; the catalog
/// normalizes missing and malformed values on load rather than rejecting the
/// whole collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLesson {
    #[serde(rename = "_id")]
    pub id: RawLessonId,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: serde_json::Value,
    #[serde(default)]
    pub spaces: serde_json::Value,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A bookable lesson with finite remaining capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    /// Identifier, stable across catalog refreshes.
    pub id: LessonId,
    pub subject: String,
    pub location: String,
    /// Price per booking. Never negative.
    pub price: Money,
    /// Remaining bookable capacity. Never negative.
    pub spaces: i64,
    pub instructor: String,
    /// Free-form schedule text.
    pub schedule: String,
    pub description: String,
    /// Image reference, resolved against the image host by [`Lesson::image_url`].
    pub image: String,
}

impl Lesson {
    /// Normalize a raw service record into a lesson.
    pub fn from_raw(raw: RawLesson) -> Self {
        let image = match raw.image {
            Some(ref name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => DEFAULT_IMAGE.to_string(),
        };
        Self {
            id: raw.id.into_lesson_id(),
            subject: non_blank(raw.subject, NO_SUBJECT),
            location: non_blank(raw.location, NO_LOCATION),
            price: Money::from_decimal(coerce_number(&raw.price).max(0.0), Currency::USD),
            spaces: (coerce_number(&raw.spaces) as i64).max(0),
            instructor: non_blank(raw.instructor, NO_INSTRUCTOR),
            schedule: raw.schedule.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            image,
        }
    }

    /// Whether the lesson has no remaining capacity.
    pub fn is_sold_out(&self) -> bool {
        self.spaces == 0
    }

    /// Absolute URL for this lesson's image on the given host.
    pub fn image_url(&self, base: &str) -> String {
        format!("{}/image/{}", base.trim_end_matches('/'), self.image)
    }

    /// Consume one space. Returns `false` (and leaves `spaces` untouched)
    /// when the lesson is sold out. Cart-only mutation.
    pub(crate) fn take_space(&mut self) -> bool {
        if self.spaces > 0 {
            self.spaces -= 1;
            true
        } else {
            false
        }
    }

    /// Give one space back. Cart-only mutation.
    pub(crate) fn restore_space(&mut self) {
        self.spaces += 1;
    }
}

fn non_blank(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => placeholder.to_string(),
    }
}

/// Coerce a loosely typed wire value to a number; anything unusable is 0.
fn coerce_number(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawLesson {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record_normalizes_verbatim() {
        let lesson = Lesson::from_raw(raw(json!({
            "_id": "sci-101",
            "subject": "Science",
            "location": "London",
            "price": 30,
            "spaces": 5,
            "instructor": "Dr. Ada",
            "schedule": "Mon 10:00",
            "description": "Intro lab",
            "image": "science.jpg"
        })));

        assert_eq!(lesson.id, LessonId::new("sci-101"));
        assert_eq!(lesson.subject, "Science");
        assert_eq!(lesson.price, Money::new(3000, Currency::USD));
        assert_eq!(lesson.spaces, 5);
        assert_eq!(lesson.image, "science.jpg");
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let lesson = Lesson::from_raw(raw(json!({ "_id": "bare" })));

        assert_eq!(lesson.subject, NO_SUBJECT);
        assert_eq!(lesson.location, NO_LOCATION);
        assert_eq!(lesson.instructor, NO_INSTRUCTOR);
        assert_eq!(lesson.price, Money::zero(Currency::USD));
        assert_eq!(lesson.spaces, 0);
        assert_eq!(lesson.schedule, "");
        assert_eq!(lesson.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let lesson = Lesson::from_raw(raw(json!({ "_id": 7 })));
        assert_eq!(lesson.id, LessonId::new("7"));
    }

    #[test]
    fn test_malformed_numbers_normalize_to_zero() {
        let lesson = Lesson::from_raw(raw(json!({
            "_id": "x",
            "price": "not a price",
            "spaces": { "weird": true }
        })));
        assert!(lesson.price.is_zero());
        assert_eq!(lesson.spaces, 0);
    }

    #[test]
    fn test_stringly_numbers_are_coerced() {
        let lesson = Lesson::from_raw(raw(json!({
            "_id": "x",
            "price": "30",
            "spaces": "5"
        })));
        assert_eq!(lesson.price, Money::new(3000, Currency::USD));
        assert_eq!(lesson.spaces, 5);
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        let lesson = Lesson::from_raw(raw(json!({
            "_id": "x",
            "price": -12.5,
            "spaces": -3
        })));
        assert!(lesson.price.is_zero());
        assert_eq!(lesson.spaces, 0);
    }

    #[test]
    fn test_blank_image_gets_default() {
        let lesson = Lesson::from_raw(raw(json!({ "_id": "x", "image": "   " })));
        assert_eq!(lesson.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_image_url() {
        let lesson = Lesson::from_raw(raw(json!({ "_id": "x", "image": "lab.jpg" })));
        assert_eq!(
            lesson.image_url("http://localhost:3000/"),
            "http://localhost:3000/image/lab.jpg"
        );
    }

    #[test]
    fn test_take_and_restore_space() {
        let mut lesson = Lesson::from_raw(raw(json!({ "_id": "x", "spaces": 1 })));
        assert!(lesson.take_space());
        assert_eq!(lesson.spaces, 0);
        assert!(lesson.is_sold_out());

        // Sold out: no-op, no underflow.
        assert!(!lesson.take_space());
        assert_eq!(lesson.spaces, 0);

        lesson.restore_space();
        assert_eq!(lesson.spaces, 1);
    }
}
