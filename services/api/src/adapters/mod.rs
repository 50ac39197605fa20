pub mod memory;

pub use memory::InMemoryProfileRepository;
