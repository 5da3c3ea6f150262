//! Observability for the site chat client.
//!
//! Spans come from `#[instrument]` on the services and the transport;
//! request and response events are emitted at debug level.

mod logging;

pub use logging::{
    log_request, log_response, loggable_body, LogFormat, LogLevel, LoggingConfig,
    MAX_LOGGED_BODY_CHARS, OMITTED_BODY,
};
