pub mod extract;
pub mod manifest;
pub mod run;
pub mod schema;
pub mod variants;
