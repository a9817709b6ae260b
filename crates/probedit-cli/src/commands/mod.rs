//! Command implementations.

pub mod render;
pub mod save;
pub mod show;

pub use self::render::execute_render;
pub use self::save::execute_save;
pub use self::show::execute_show;
