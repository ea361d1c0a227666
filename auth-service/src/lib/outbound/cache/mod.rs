pub mod redis;

pub use redis::RedisTokenCache;
