use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Route table of the whole application.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Rooms
        .route(
            "/api/rooms",
            get(handlers::rooms::list).post(handlers::rooms::create),
        )
        .route("/api/rooms/delete", post(handlers::rooms::delete_many))
        .route(
            "/api/rooms/:id",
            get(handlers::rooms::get_by_id)
                .put(handlers::rooms::update)
                .delete(handlers::rooms::delete),
        )
        .route("/api/rooms/:id/lessons", get(handlers::rooms::get_lessons))
        // Tags
        .route(
            "/api/tags",
            get(handlers::tags::list).post(handlers::tags::create),
        )
        .route("/api/tags/delete", post(handlers::tags::delete_many))
        .route(
            "/api/tags/:id",
            get(handlers::tags::get_by_id)
                .put(handlers::tags::update)
                .delete(handlers::tags::delete),
        )
        // Timeslots
        .route(
            "/api/timeslots",
            get(handlers::timeslots::list).post(handlers::timeslots::create),
        )
        .route(
            "/api/timeslots/delete",
            post(handlers::timeslots::delete_many),
        )
        .route(
            "/api/timeslots/:id",
            get(handlers::timeslots::get_by_id)
                .put(handlers::timeslots::update)
                .delete(handlers::timeslots::delete),
        )
        .route(
            "/api/timeslots/:id/lessons",
            get(handlers::timeslots::get_lessons),
        )
        // Lessons
        .route(
            "/api/lessons",
            get(handlers::lessons::list).post(handlers::lessons::create),
        )
        .route(
            "/api/lessons/:id",
            get(handlers::lessons::get_by_id)
                .put(handlers::lessons::update)
                .delete(handlers::lessons::delete),
        )
        // Timetables
        .route(
            "/api/timetables",
            get(handlers::timetables::list).post(handlers::timetables::create),
        )
        .route(
            "/api/timetables/:id",
            get(handlers::timetables::get_by_id).delete(handlers::timetables::delete),
        )
        // Constraints
        .route("/api/constraints", get(handlers::constraints::list))
        .route("/api/constraints/:id", get(handlers::constraints::get_by_id))
        .route(
            "/api/constraints/:id/instances",
            get(handlers::constraints::get_instances),
        )
        // Server settings
        .route(
            "/api/server/current-year",
            get(handlers::server::get_current_year).put(handlers::server::set_current_year),
        )
}
