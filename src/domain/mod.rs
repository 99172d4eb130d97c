// Domain layer: postings, digests and the ports the core drives.
// No I/O here; adapters implement the ports.

pub mod model;
pub mod ports;
