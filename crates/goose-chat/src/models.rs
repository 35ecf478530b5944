//! These models represent the values handed to the chat view by the message stream
//!
//! There are a few related shapes we need to accept:
//! - messages as the server streams them, with tool requests and responses inline
//! - out-of-band notifications (log lines, progress) tagged with the request they belong to
//! - schema content produced for a finished assistant message
//!
//! All of them arrive as JSON with camelCase field names. We deserialize straight into the
//! structs below, and everything downstream works on these already-structured values.
pub mod content;
pub mod message;
pub mod notification;
pub mod role;
pub mod tool;
mod tool_result;
