pub mod account;
pub mod item;
pub mod memory;

pub use account::PostgresAccountRepository;
pub use item::PostgresItemRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryItemRepository;
