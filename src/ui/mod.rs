pub mod blocks;
pub mod render;
pub mod shell;
pub mod theme;
