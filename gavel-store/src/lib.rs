pub mod app_config;
pub mod database;
pub mod redis_repo;
pub mod user_repo;
pub mod auction_repo;
pub mod bid_repo;
pub mod memory;
pub mod backend;

pub use database::DbClient;
pub use redis_repo::{RedisClient, RedisSessionStore};
pub use user_repo::StoreUserRepository;
pub use auction_repo::StoreAuctionRepository;
pub use bid_repo::StoreBidRepository;
pub use memory::InMemoryStore;
pub use backend::{connect, StoreError, Stores};
