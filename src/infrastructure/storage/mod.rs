//! Process-local store implementations

mod memory;

pub use memory::InMemoryCustomerRepository;
