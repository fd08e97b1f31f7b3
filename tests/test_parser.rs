use alcove::http::parser::{ParseError, parse_request_line};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request_line(req).unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.raw_path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
}

#[test]
fn test_parse_consumes_only_the_request_line() {
    let req = b"GET /docs HTTP/1.1\r\nHost: localhost\r\nUser-Agent: test-client\r\n\r\nignored body";
    let parsed = parse_request_line(req).unwrap();

    assert_eq!(parsed.raw_path, "/docs");
    assert_eq!(parsed.version, "HTTP/1.1");
}

#[test]
fn test_parse_percent_decodes_path() {
    let req = b"GET /my%20docs/report%20final.pdf HTTP/1.1\r\n\r\n";
    let parsed = parse_request_line(req).unwrap();

    assert_eq!(parsed.raw_path, "/my docs/report final.pdf");
}

#[test]
fn test_parse_method_is_opaque() {
    // The method token is stored as-is and never validated
    let req = b"FETCH /a.html HTTP/1.1\r\n\r\n";
    let parsed = parse_request_line(req).unwrap();

    assert_eq!(parsed.method, "FETCH");
}

#[test]
fn test_parse_incomplete_without_line_terminator() {
    let req = b"GET / HTTP/1.1";
    let result = parse_request_line(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_empty_buffer_is_incomplete() {
    let result = parse_request_line(b"");

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_rejects_single_token_line() {
    let req = b"BADLINE\r\n";
    let result = parse_request_line(req);

    assert!(matches!(result, Err(ParseError::MalformedLine)));
}

#[test]
fn test_parse_rejects_two_token_line() {
    let req = b"GET /\r\n";
    let result = parse_request_line(req);

    assert!(matches!(result, Err(ParseError::MalformedLine)));
}

#[test]
fn test_parse_rejects_four_token_line() {
    let req = b"GET / HTTP/1.1 extra\r\n";
    let result = parse_request_line(req);

    assert!(matches!(result, Err(ParseError::MalformedLine)));
}

#[test]
fn test_parse_rejects_bad_percent_encoding() {
    // %FF decodes to a byte that is not valid UTF-8
    let req = b"GET /%ff HTTP/1.1\r\n\r\n";
    let result = parse_request_line(req);

    assert!(matches!(result, Err(ParseError::BadPercentEncoding)));
}

#[test]
fn test_parse_tolerates_bare_lf_terminator() {
    let req = b"GET /a.html HTTP/1.1\n";
    let parsed = parse_request_line(req).unwrap();

    assert_eq!(parsed.raw_path, "/a.html");
}
