pub mod constraint;
pub mod lesson;
pub mod room;
pub mod server;
pub mod tag;
pub mod timeslot;
pub mod timetable;
