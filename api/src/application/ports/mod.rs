pub mod id_sequence;
pub mod user_repository;
