pub mod rest;
pub mod state;
pub mod update;

// Re-export the handlers to make them easily accessible
// to the code that builds the web server router.
pub use rest::{
    get_lecture_handler, health_handler, list_lectures_handler, summarize_lecture_handler,
    update_lecture_handler,
};
