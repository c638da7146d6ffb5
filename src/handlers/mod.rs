pub mod chat;
pub mod health;
pub mod perfumes;

pub use chat::chat_config;
pub use health::health_check;
pub use perfumes::perfumes_config;
