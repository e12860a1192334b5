//! Multi-table deletion of rooms, tags and timeslots.
//!
//! Nothing in the schema enforces the references these entities receive
//! from lessons and constraint instances, so each batch delete removes the
//! dependents first and runs inside one transaction: either every id in
//! the batch resolves and the full cascade is applied, or the database is
//! left untouched.

pub mod constraint_instance_deleter;
pub mod lessons_deleter;
pub mod rooms;
pub mod tags;
pub mod timeslots;
