use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::files::listing;
use crate::files::resolver::{PathResolver, Resolution, TargetKind, content_type_for};
use crate::http::parser::{ParseError, parse_request_line};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Upper bound on buffered bytes while waiting for the request line
/// terminator; anything longer is answered with 400.
const MAX_REQUEST_BYTES: usize = 8 * 1024;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    state: ConnectionState,
    resolver: Arc<PathResolver>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    Disconnected,
}

impl Connection {
    pub fn new(stream: TcpStream, resolver: Arc<PathResolver>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            state: ConnectionState::Reading,
            resolver,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        ReadOutcome::Request(req) => {
                            self.state = ConnectionState::Processing(req);
                        }

                        ReadOutcome::Malformed(e) => {
                            warn!("Malformed request line: {:?}", e);
                            let writer = ResponseWriter::new(&Response::bad_request());
                            self.state = ConnectionState::Writing(writer);
                        }

                        ReadOutcome::Disconnected => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = Self::handle_request(&self.resolver, req).await;

                    debug!(
                        method = %req.method,
                        path = %req.raw_path,
                        status = response.status.as_u16(),
                        "Request answered"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_request_line(&self.buffer) {
                Ok(request) => return Ok(ReadOutcome::Request(request)),

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Ok(ReadOutcome::Malformed(e)),
            }

            if self.buffer.len() >= MAX_REQUEST_BYTES {
                return Ok(ReadOutcome::Malformed(ParseError::MalformedLine));
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed before sending a full request line
                return Ok(ReadOutcome::Disconnected);
            }
        }
    }

    /// Drives the resolution pipeline: redirect, listing, file body, or
    /// the merged 404 for missing/disallowed targets.
    async fn handle_request(resolver: &PathResolver, req: &Request) -> Response {
        match resolver.resolve(&req.raw_path) {
            Resolution::Redirect(location) => Response::moved_permanently(&location),

            Resolution::Target(target) => match target.kind {
                TargetKind::Directory => {
                    match listing::render_listing(&target.path, &req.raw_path, resolver) {
                        Ok(html) => Response::ok("text/html", html.into_bytes()),
                        Err(e) => {
                            warn!("Failed to list {}: {}", target.path.display(), e);
                            Response::not_found()
                        }
                    }
                }

                TargetKind::File => match tokio::fs::read(&target.path).await {
                    Ok(body) => Response::ok(content_type_for(&target.path), body),
                    Err(e) => {
                        warn!("Failed to read {}: {}", target.path.display(), e);
                        Response::not_found()
                    }
                },

                TargetKind::Missing | TargetKind::Disallowed => Response::not_found(),
            },
        }
    }
}
