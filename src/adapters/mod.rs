// Adapters layer: concrete implementations of the domain ports (HTTP API, file storage).

pub mod http;
pub mod storage;
