//! Reservation snapshots.

use crate::catalog::Lesson;
use crate::ids::LessonId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One unit of cart-held intent to book a specific lesson.
///
/// Fields are copied from the lesson at add-time so removal, display, and
/// aggregation do not depend on the catalog entry still existing unchanged —
/// a refresh may replace or drop the entry while the reservation is held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub lesson_id: LessonId,
    pub subject: String,
    pub price: Money,
    pub location: String,
    pub instructor: String,
}

impl Reservation {
    /// Snapshot the given lesson.
    pub fn snapshot(lesson: &Lesson) -> Self {
        Self {
            lesson_id: lesson.id.clone(),
            subject: lesson.subject.clone(),
            price: lesson.price,
            location: lesson.location.clone(),
            instructor: lesson.instructor.clone(),
        }
    }
}
