//! Request handlers for the stevedore artifact plugin.
//!
//! The host loads this plugin in-process and calls it synchronously per
//! request: one JSON body in, one JSON value out, routed by message name.
//! There is no listener, no background task, and no state between calls.
//!
//! `handle()` is the async entry point for hosts that already run inside
//! a runtime; `handle_request()` wraps it for a fully synchronous host
//! boundary, building a current-thread runtime scoped to the one call.

pub mod error;
pub mod handlers;
pub mod message;

pub use error::PluginError;
pub use message::Message;

use serde_json::Value;

/// Handle one plugin call.
///
/// # Errors
/// `UnknownMessage` for names outside the core message set, otherwise
/// whatever the handler reports. Validation failures are not errors;
/// they come back as a response body of `{key, message}` entries.
pub async fn handle(message_name: &str, body: &str) -> Result<Value, PluginError> {
    let message: Message =
        Message::from_name(message_name).ok_or_else(|| PluginError::UnknownMessage {
            name: message_name.to_string(),
        })?;

    handlers::dispatch(message, body).await
}

/// Blocking variant of [`handle`] for synchronous hosts.
///
/// The runtime is request-scoped: built for this call, dropped with it.
pub fn handle_request(message_name: &str, body: &str) -> Result<Value, PluginError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PluginError::Runtime {
            message: e.to_string(),
        })?;

    runtime.block_on(handle(message_name, body))
}
