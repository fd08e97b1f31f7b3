use crate::http::request::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong token count or non-UTF-8 request line
    MalformedLine,
    /// Path token fails percent-decoding
    BadPercentEncoding,
    /// No line terminator received yet
    Incomplete,
}

/// Parses the request line out of `buf`.
///
/// Succeeds once the buffer holds a line terminator and the first line
/// splits into exactly three whitespace-separated tokens (method, path,
/// version). The path token is percent-decoded before being stored.
/// Everything after the first line is ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {

    // Frame on the first line terminator; tolerate a bare LF
    let line_end = buf
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(ParseError::Incomplete)?;

    let line = &buf[..line_end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    let line = std::str::from_utf8(line).map_err(|_| ParseError::MalformedLine)?;

    let mut tokens = line.split_whitespace();
    let (method, path, version) =
        match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some(m), Some(p), Some(v), None) => (m, p, v),
            _ => return Err(ParseError::MalformedLine),
        };

    let raw_path = urlencoding::decode(path)
        .map_err(|_| ParseError::BadPercentEncoding)?
        .into_owned();

    Ok(Request {
        method: method.to_string(),
        raw_path,
        version: version.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request_line(req).unwrap();

        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.raw_path, "/");
        assert_eq!(parsed.version, "HTTP/1.1");
    }
}
