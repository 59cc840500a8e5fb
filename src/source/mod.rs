// Byte source abstraction — pluggable backends for fetching image payloads.

pub mod http_source;
pub mod traits;
