pub mod match_rows;
pub mod repository;
pub mod service;
