pub mod chat_task;
pub mod deadline;
pub mod protocol;
pub mod rest;
pub mod scan_task;
pub mod state;
pub mod view;
pub mod ws_handler;

// Re-export the handlers the binary needs to build the web server router.
pub use rest::{get_disease_handler, get_plant_handler, list_diseases_handler, list_plants_handler};
pub use ws_handler::ws_handler;
