//! Injectable storefront state container.

use crate::cart::Cart;
use crate::catalog::{Lesson, LessonCatalog};
use crate::error::CommerceError;
use crate::ids::LessonId;

/// The mutable storefront state shared by user actions and the checkout
/// saga: the catalog/cart pair plus the lesson currently being viewed.
///
/// An explicit value passed to whoever needs it, not an ambient global. The
/// viewed lesson is tracked by id: catalog refreshes replace entries
/// wholesale, so the accessor re-resolves against the current list and a
/// since-removed lesson simply reads back as `None`.
#[derive(Debug, Clone, Default)]
pub struct StorefrontState {
    pub catalog: LessonCatalog,
    pub cart: Cart,
    viewed: Option<LessonId>,
}

impl StorefrontState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve one space on a lesson into the cart.
    pub fn add_to_cart(&mut self, lesson_id: &LessonId) -> Result<(), CommerceError> {
        self.cart.add_reservation(&mut self.catalog, lesson_id)
    }

    /// Remove the cart entry at `index`, restoring its space.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<(), CommerceError> {
        self.cart.remove_reservation(&mut self.catalog, index)?;
        Ok(())
    }

    /// Explicitly empty the cart, restoring every reserved space.
    pub fn clear_cart(&mut self) {
        self.cart.clear(&mut self.catalog);
    }

    /// Point the detail view at a lesson.
    pub fn view_lesson(&mut self, lesson_id: LessonId) {
        self.viewed = Some(lesson_id);
    }

    /// The lesson currently being viewed, resolved against the current
    /// catalog list.
    pub fn viewed_lesson(&self) -> Option<&Lesson> {
        self.viewed.as_ref().and_then(|id| self.catalog.get(id))
    }

    /// Whether checkout can be offered: a non-empty cart whose reserved
    /// lessons all still exist in the catalog.
    pub fn checkout_enabled(&self) -> bool {
        !self.cart.is_empty()
            && self
                .cart
                .items()
                .iter()
                .all(|r| self.catalog.get(&r.lesson_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawLesson;
    use serde_json::json;

    fn seeded_state() -> StorefrontState {
        let raw: Vec<RawLesson> = serde_json::from_value(json!([
            { "_id": "sci-101", "subject": "Science", "price": 30, "spaces": 2 },
            { "_id": "math-201", "subject": "Maths", "price": 25, "spaces": 1 },
        ]))
        .unwrap();
        let mut state = StorefrontState::new();
        state
            .catalog
            .replace_for_tests(raw.into_iter().map(Lesson::from_raw).collect());
        state
    }

    #[test]
    fn test_cart_mutations_go_through_catalog() {
        let mut state = seeded_state();
        let id = LessonId::new("sci-101");

        state.add_to_cart(&id).unwrap();
        assert_eq!(state.catalog.spaces_for(&id), 1);

        state.remove_from_cart(0).unwrap();
        assert_eq!(state.catalog.spaces_for(&id), 2);
    }

    #[test]
    fn test_viewed_lesson_repoints_across_replacement() {
        let mut state = seeded_state();
        let id = LessonId::new("sci-101");
        state.view_lesson(id.clone());
        assert_eq!(state.viewed_lesson().map(|l| l.spaces), Some(2));

        // A refresh replaces the list wholesale; the view follows the id.
        let raw: Vec<RawLesson> = serde_json::from_value(json!([
            { "_id": "sci-101", "subject": "Science", "price": 30, "spaces": 7 },
        ]))
        .unwrap();
        state
            .catalog
            .replace_for_tests(raw.into_iter().map(Lesson::from_raw).collect());

        assert_eq!(state.viewed_lesson().map(|l| l.spaces), Some(7));
    }

    #[test]
    fn test_viewed_lesson_gone_after_replacement() {
        let mut state = seeded_state();
        state.view_lesson(LessonId::new("math-201"));

        state.catalog.replace_for_tests(vec![]);
        assert!(state.viewed_lesson().is_none());
    }

    #[test]
    fn test_checkout_enabled() {
        let mut state = seeded_state();
        assert!(!state.checkout_enabled());

        state.add_to_cart(&LessonId::new("sci-101")).unwrap();
        assert!(state.checkout_enabled());

        // The reserved lesson vanishes from the catalog.
        state.catalog.replace_for_tests(vec![]);
        assert!(!state.checkout_enabled());
    }
}
