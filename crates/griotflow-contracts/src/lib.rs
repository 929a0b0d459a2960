pub mod console;
pub mod events;
pub mod presets;
pub mod prompts;
pub mod report;
pub mod schema;
pub mod session;
pub mod thumbnail;
