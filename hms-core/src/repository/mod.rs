//! Data access over the application database.
//!
//! Every statement is parameterized. Multi-statement writes (bill save and
//! delete) run inside transactions; everything else is a single round trip.

pub mod appointments;
pub mod bills;
pub mod doctors;
pub mod patients;
