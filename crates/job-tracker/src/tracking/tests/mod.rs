mod analytics;
mod common;
mod repository;
