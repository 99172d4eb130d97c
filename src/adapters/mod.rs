// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod smtp;
pub mod storage;

pub use http::WantedClient;
pub use smtp::SmtpMailer;
pub use storage::FileWatermarkStore;
