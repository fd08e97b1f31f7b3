/// Represents a parsed HTTP request line from a client.
///
/// Only the request line is consumed; request headers and body are ignored
/// entirely. The method is kept as an opaque string and never dispatched
/// on — every request is answered by path resolution alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method token as received (e.g. "GET")
    pub method: String,
    /// The request path, percent-decoded (e.g. "/index.html")
    pub raw_path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
}
