//! The locally held lesson catalog.

use crate::catalog::Lesson;
use crate::error::CommerceError;
use crate::ids::LessonId;
use crate::remote::LessonService;
use tracing::{debug, warn};

/// The canonical-as-known lesson list, fetched from the remote lesson service.
///
/// The list is replaced wholesale on every successful load; entries are never
/// mutated in place by a refresh. Capacity (`spaces`) is mutated locally only
/// through the cart's reservation paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the lesson collection and replace the current list with
    /// normalized entries.
    ///
    /// On a transport error or non-success response this fails with
    /// [`CommerceError::CatalogUnavailable`] and the previous catalog state
    /// is left untouched — no partial overwrite.
    pub async fn load<S>(&mut self, service: &S) -> Result<(), CommerceError>
    where
        S: LessonService + ?Sized,
    {
        let raw = service.fetch_lessons().await.map_err(|e| {
            warn!(error = %e, "lesson catalog load failed; keeping previous state");
            CommerceError::CatalogUnavailable(e)
        })?;

        let lessons: Vec<Lesson> = raw.into_iter().map(Lesson::from_raw).collect();
        debug!(count = lessons.len(), "lesson catalog loaded");
        self.lessons = lessons;
        Ok(())
    }

    /// Identical contract to [`LessonCatalog::load`]; used after checkout to
    /// pull authoritative capacity.
    pub async fn refresh<S>(&mut self, service: &S) -> Result<(), CommerceError>
    where
        S: LessonService + ?Sized,
    {
        self.load(service).await
    }

    /// All lessons, in service order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Look up a lesson by id.
    pub fn get(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    /// Remaining spaces for a lesson; `0` if it is no longer in the catalog.
    pub fn spaces_for(&self, id: &LessonId) -> i64 {
        self.get(id).map(|l| l.spaces).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Mutable lookup, reserved to the cart's reservation paths.
    pub(crate) fn get_mut(&mut self, id: &LessonId) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| &l.id == id)
    }

    /// Seed the catalog directly, bypassing the service round-trip.
    #[cfg(test)]
    pub(crate) fn replace_for_tests(&mut self, lessons: Vec<Lesson>) {
        self.lessons = lessons;
    }
}
