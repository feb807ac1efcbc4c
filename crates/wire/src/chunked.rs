// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Transfer-Encoding: chunked` codec.

use std::fmt::Write as _;

use crate::FrameError;

/// Encode `body` as a chunked transfer with chunks of at most `chunk_size`
/// bytes, including the terminating zero-size chunk.
pub fn encode_chunked(body: &[u8], chunk_size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 16);
    for chunk in body.chunks(chunk_size.max(1)) {
        let mut size_line = String::new();
        let _ = write!(size_line, "{:x}\r\n", chunk.len());
        out.extend_from_slice(size_line.as_bytes());
        out.extend_from_slice(chunk);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"0\r\n\r\n");
    out
}

/// Move every complete chunk at the front of `input` into `body`.
///
/// Incomplete chunks are left in `input` untouched. Returns the number of
/// bytes consumed from `input` and whether the terminating chunk (and any
/// trailer section) has been seen.
pub(crate) fn decode_available(
    input: &mut Vec<u8>,
    body: &mut Vec<u8>,
) -> Result<(usize, bool), FrameError> {
    let mut offset = 0;
    let outcome = loop {
        let rest = &input[offset..];
        let Some(line_end) = find(rest, b"\r\n") else {
            break (offset, false);
        };
        let size = parse_size(&rest[..line_end])?;
        let data_start = line_end + 2;

        if size == 0 {
            let trailer = &rest[data_start..];
            if trailer.starts_with(b"\r\n") {
                break (offset + data_start + 2, true);
            }
            match find(trailer, b"\r\n\r\n") {
                Some(end) => break (offset + data_start + end + 4, true),
                None => break (offset, false),
            }
        }

        let Some(data_end) = data_start.checked_add(size).filter(|end| end.checked_add(2).is_some()) else {
            return Err(FrameError::InvalidChunk(format!("chunk size {size:#x} is too large")));
        };
        if rest.len() < data_end + 2 {
            break (offset, false);
        }
        if &rest[data_end..data_end + 2] != b"\r\n" {
            return Err(FrameError::InvalidChunk("chunk data not followed by CRLF".into()));
        }
        body.extend_from_slice(&rest[data_start..data_end]);
        offset += data_end + 2;
    };

    input.drain(..outcome.0);
    Ok(outcome)
}

fn parse_size(line: &[u8]) -> Result<usize, FrameError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| FrameError::InvalidChunk("size line is not ASCII".into()))?;
    // Chunk extensions are allowed after ';' and carry nothing snapd uses.
    let digits = text.split(';').next().unwrap_or_default().trim();
    if digits.is_empty() {
        return Err(FrameError::InvalidChunk(format!("empty chunk size in {text:?}")));
    }
    usize::from_str_radix(digits, 16)
        .map_err(|_| FrameError::InvalidChunk(format!("bad chunk size {digits:?}")))
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
#[path = "chunked_tests.rs"]
mod tests;
