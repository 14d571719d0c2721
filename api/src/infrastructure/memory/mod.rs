pub mod id_sequence_atomic;
pub mod user_repository_memory;

pub use id_sequence_atomic::AtomicIdSequence;
pub use user_repository_memory::InMemoryUserRepository;
