pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use repository::Store;
