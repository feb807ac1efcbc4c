// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP/1.1 framing for the snapd socket.
//!
//! Requests are plain HTTP/1.1; responses are parsed incrementally from raw
//! socket bytes, including chunked bodies and `application/json-seq` streams.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod chunked;
mod error;
mod framer;
mod headers;
mod request;

pub use chunked::encode_chunked;
pub use error::FrameError;
pub use framer::{
    Encoding, FrameEvent, Framer, PartialResponse, Response, ResponseHead, JSON_SEQ_CONTENT_TYPE,
    RECORD_SEPARATOR,
};
pub use headers::Headers;
pub use request::{encode_component, Method, WireRequest};
