//! Lesson catalog module.
//!
//! Contains the lesson record, its tolerant wire shape, and the locally held
//! catalog that tracks remote capacity.

mod catalog;
mod lesson;

pub use catalog::LessonCatalog;
pub use lesson::{Lesson, RawLesson, RawLessonId, DEFAULT_IMAGE, NO_INSTRUCTOR, NO_LOCATION, NO_SUBJECT};
