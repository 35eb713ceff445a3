//! The reservation cart.

use crate::cart::Reservation;
use crate::catalog::LessonCatalog;
use crate::checkout::AggregatedLine;
use crate::error::CommerceError;
use crate::ids::LessonId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An ordered sequence of reservations against catalog entries.
///
/// The cart is the only mutator of lesson capacity besides a catalog refresh:
/// adding a reservation decrements the lesson's spaces, removing or clearing
/// restores them. Insertion order is kept for display and aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<Reservation>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve one space on a lesson.
    ///
    /// Fails with [`CommerceError::LessonNotFound`] for an unknown id and
    /// [`CommerceError::NoCapacity`] for a sold-out lesson; a sold-out add is
    /// a no-op, not a silent skip. On success the reservation snapshot is
    /// appended and the lesson's spaces decrement by exactly 1.
    pub fn add_reservation(
        &mut self,
        catalog: &mut LessonCatalog,
        lesson_id: &LessonId,
    ) -> Result<(), CommerceError> {
        let lesson = catalog
            .get_mut(lesson_id)
            .ok_or_else(|| CommerceError::LessonNotFound(lesson_id.clone()))?;

        if !lesson.take_space() {
            return Err(CommerceError::NoCapacity(lesson_id.clone()));
        }

        self.items.push(Reservation::snapshot(lesson));
        Ok(())
    }

    /// Remove the reservation at `index`, restoring the lesson's spaces by 1.
    ///
    /// If the lesson has since disappeared from the catalog the restore is
    /// skipped — capacity for a removed lesson cannot be given back. Relative
    /// order of the remaining reservations is preserved.
    pub fn remove_reservation(
        &mut self,
        catalog: &mut LessonCatalog,
        index: usize,
    ) -> Result<Reservation, CommerceError> {
        if index >= self.items.len() {
            return Err(CommerceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let reservation = self.items.remove(index);
        if let Some(lesson) = catalog.get_mut(&reservation.lesson_id) {
            lesson.restore_space();
        }
        Ok(reservation)
    }

    /// Empty the cart, restoring spaces for every reservation whose lesson is
    /// still in the catalog.
    ///
    /// This is the explicit "empty cart" action. Checkout success does NOT go
    /// through here: reserved spaces become permanent then.
    pub fn clear(&mut self, catalog: &mut LessonCatalog) {
        for reservation in self.items.drain(..) {
            if let Some(lesson) = catalog.get_mut(&reservation.lesson_id) {
                lesson.restore_space();
            }
        }
    }

    /// Empty the cart without restoring spaces: checkout succeeded and the
    /// reserved spaces are now consumed.
    pub(crate) fn clear_after_checkout(&mut self) {
        self.items.clear();
    }

    /// Collapse reservations into order lines, one per distinct lesson in
    /// first-seen order; quantity is the occurrence count.
    ///
    /// All occurrences of a lesson carry the same snapshot price under
    /// correct use; if they diverge, the first-seen price wins.
    pub fn aggregate(&self) -> Vec<AggregatedLine> {
        let mut lines: Vec<AggregatedLine> = Vec::new();
        for item in &self.items {
            match lines.iter_mut().find(|l| l.lesson_id == item.lesson_id) {
                Some(line) => line.quantity += 1,
                None => lines.push(AggregatedLine {
                    lesson_id: item.lesson_id.clone(),
                    subject: item.subject.clone(),
                    unit_price: item.price,
                    quantity: 1,
                }),
            }
        }
        lines
    }

    /// Sum of the snapshot prices of every reservation.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let currency = self
            .items
            .first()
            .map(|r| r.price.currency)
            .unwrap_or_default();
        Money::try_sum(self.items.iter().map(|r| &r.price), currency)
            .ok_or(CommerceError::Overflow)
    }

    /// Reservations in insertion order.
    pub fn items(&self) -> &[Reservation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
