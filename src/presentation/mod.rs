// Presentation layer - Read-only rendering of the sync core's state
pub mod render;
