pub mod configure;
pub mod locate;
pub mod render;
pub mod schema;
pub mod style;
