// Application layer - Use cases and ports
pub mod catalog_service;
pub mod progress_repository;
pub mod sync_service;
