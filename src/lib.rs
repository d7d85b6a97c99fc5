//! Lehua Library
//!
//! Case-insensitive prefix search over a dynamic vocabulary. The library holds
//! the trie engine, the dynamically-typed binding that hosts call into, a
//! contact directory built on the engine, and the JSON-RPC surface served by
//! the `lehua` binary over stdin/stdout.
//!
//! # Architecture
//!
//! - [`data_structures`]: the [`LehuaTrie`](data_structures::LehuaTrie) engine
//! - [`protocol::binding`]: argument checking in front of one engine
//! - [`search`]: the name/e-mail [`ContactIndex`](search::ContactIndex)
//! - [`protocol::jsonrpc`]: request handling and method registration
//! - [`transport`]: newline-delimited framing over async byte streams
//! - [`config`] and [`error`]: the ambient layers shared by all of the above

pub mod config;
pub mod data_structures;
pub mod error;
pub mod protocol;
pub mod search;
pub mod transport;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Lehua.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed error reporter and the global configuration.
pub fn init(config: config::LehuaConfig) {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
    config::init_global_config(config);
}
