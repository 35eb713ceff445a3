//! Reservation cart module.
//!
//! Contains the cart and the denormalized reservation snapshots it holds.

mod cart;
mod reservation;

pub use cart::Cart;
pub use reservation::Reservation;
