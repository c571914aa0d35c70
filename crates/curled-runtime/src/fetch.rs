//! URL fetching helpers built on `Session`
//!
//! `fetch_url` downloads a URL into memory, `track_location` lists the
//! redirect chain starting at a URL without downloading bodies.

use crate::constants::*;
use crate::error::CurlResult;
use crate::session::Session;
use crate::value::{Value, WriteCallback};
use std::cell::RefCell;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Redirects followed by a fresh `fetch_url` session
pub const DEFAULT_MAX_REDIRS: i64 = 5;

/// Upper bound on hops `track_location` walks
pub const MAX_TRACKED_HOPS: usize = 50;

/// The result of a `fetch_url` call
///
/// Reads and seeks over the response body.
#[derive(Debug, Clone)]
pub struct UrlResult {
    /// URL originally requested
    pub url: String,
    /// URL actually loaded after redirects
    pub effective_url: String,
    /// Response headers of the final response, in arrival order
    pub headers: Vec<(String, String)>,
    pub response_code: i64,
    pub duration: Duration,
    body: Cursor<Vec<u8>>,
}

impl UrlResult {
    /// First header value named `name`, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Distinct header names
    pub fn header_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (key, _) in &self.headers {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(key)) {
                names.push(key);
            }
        }
        names
    }

    /// Total body length, independent of the read position
    pub fn len(&self) -> usize {
        self.body.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn body(&self) -> &[u8] {
        self.body.get_ref()
    }
}

impl Read for UrlResult {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl Seek for UrlResult {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.body.seek(pos)
    }
}

/// Split a raw header line into `(name, value)`
///
/// Status lines and the blank terminator carry no colon and yield `None`.
pub fn parse_header_line(line: &[u8]) -> Option<(String, String)> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(['\r', '\n']);
    let (name, value) = line.split_once(':')?;
    Some((name.to_string(), value.trim_start().to_string()))
}

/// Download `url` and return its body and metadata
///
/// With no `session`, a fresh one is created that follows up to
/// `DEFAULT_MAX_REDIRS` redirects. A caller's session is used as configured,
/// with URL, body, header and request-header options overwritten.
pub fn fetch_url(
    url: &str,
    headers: &[(&str, &str)],
    session: Option<&mut Session>,
) -> CurlResult<UrlResult> {
    match session {
        Some(session) => fetch_with(session, url, headers),
        None => {
            let mut session = Session::create()?;
            session.set_option(CURLOPT_FOLLOWLOCATION, true)?;
            session.set_option(CURLOPT_MAXREDIRS, DEFAULT_MAX_REDIRS)?;
            fetch_with(&mut session, url, headers)
        }
    }
}

fn fetch_with(session: &mut Session, url: &str, headers: &[(&str, &str)]) -> CurlResult<UrlResult> {
    let body = Rc::new(RefCell::new(Vec::new()));
    let received = Rc::new(RefCell::new(Vec::new()));

    session.set_option(CURLOPT_URL, url)?;

    let sink = Rc::clone(&body);
    session.set_option(
        CURLOPT_WRITEFUNCTION,
        WriteCallback::function(move |chunk| {
            sink.borrow_mut().extend_from_slice(chunk);
            Ok(())
        }),
    )?;

    let lines = Rc::clone(&received);
    session.set_option(
        CURLOPT_HEADERFUNCTION,
        WriteCallback::function(move |line| {
            // A new status line starts a new response (e.g. after a redirect)
            if line.starts_with(b"HTTP/") {
                lines.borrow_mut().clear();
            } else if let Some(header) = parse_header_line(line) {
                lines.borrow_mut().push(header);
            }
            Ok(())
        }),
    )?;

    if !headers.is_empty() {
        let request_headers: Vec<String> = headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        session.set_option(CURLOPT_HTTPHEADER, request_headers)?;
    }

    debug!(url, "fetching");
    let outcome = session.perform().and_then(|()| {
        let effective_url = session
            .get_info(CURLINFO_EFFECTIVE_URL)?
            .into_opt_string()
            .unwrap_or_else(|| url.to_string());
        let response_code = session.get_info(CURLINFO_RESPONSE_CODE)?.as_int().unwrap_or(0);
        let seconds = session.get_info(CURLINFO_TOTAL_TIME)?.as_double().unwrap_or(0.0);
        Ok((effective_url, response_code, seconds))
    });

    // Detach the closures from the caller's session either way
    session.set_option(CURLOPT_WRITEFUNCTION, Value::Null)?;
    session.set_option(CURLOPT_HEADERFUNCTION, Value::Null)?;
    if !headers.is_empty() {
        session.set_option(CURLOPT_HTTPHEADER, Value::Null)?;
    }

    let (effective_url, response_code, seconds) = outcome?;
    let duration = if seconds.is_finite() && seconds > 0.0 {
        Duration::from_secs_f64(seconds)
    } else {
        Duration::ZERO
    };

    Ok(UrlResult {
        url: url.to_string(),
        effective_url,
        headers: received.take(),
        response_code,
        duration,
        body: Cursor::new(body.take()),
    })
}

/// URLs visited when following the redirect chain from `url`
///
/// Each hop is requested with `NOBODY` set and `FOLLOWLOCATION` off; the
/// walk stops when a response has no redirect target or points back at a
/// URL already visited.
pub fn track_location(
    url: &str,
    headers: &[(&str, &str)],
    session: Option<&mut Session>,
) -> CurlResult<Vec<String>> {
    let mut owned;
    let session = match session {
        Some(session) => session,
        None => {
            owned = Session::create()?;
            &mut owned
        }
    };

    session.set_option(CURLOPT_FOLLOWLOCATION, false)?;
    session.set_option(CURLOPT_NOBODY, true)?;

    let mut visited = vec![url.to_string()];
    let mut current = url.to_string();
    while visited.len() < MAX_TRACKED_HOPS {
        fetch_with(session, &current, headers)?;
        let next = match session.get_info(CURLINFO_REDIRECT_URL)?.into_opt_string() {
            Some(next) if !visited.contains(&next) => next,
            _ => break,
        };
        debug!(from = %current, to = %next, "redirect");
        visited.push(next.clone());
        current = next;
    }

    session.set_option(CURLOPT_NOBODY, false)?;
    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_header_line() {
        assert_eq!(
            parse_header_line(b"Content-Type: text/html\r\n"),
            Some(("Content-Type".to_string(), "text/html".to_string()))
        );
        assert_eq!(
            parse_header_line(b"Location:http://a.test/b\r\n"),
            Some(("Location".to_string(), "http://a.test/b".to_string()))
        );
        assert_eq!(parse_header_line(b"\r\n"), None);
    }

    #[test]
    fn test_url_result_reads_and_seeks() {
        let mut result = UrlResult {
            url: "http://a.test/".to_string(),
            effective_url: "http://a.test/".to_string(),
            headers: vec![
                ("Content-Type".to_string(), "text/plain".to_string()),
                ("X-Thing".to_string(), "1".to_string()),
                ("x-thing".to_string(), "2".to_string()),
            ],
            response_code: 200,
            duration: Duration::ZERO,
            body: Cursor::new(b"hello".to_vec()),
        };

        let mut text = String::new();
        result.read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello");

        result.seek(SeekFrom::Start(1)).unwrap();
        let mut rest = Vec::new();
        result.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"ello");

        assert_eq!(result.len(), 5);
        assert_eq!(result.header("content-type"), Some("text/plain"));
        assert_eq!(result.header("X-THING"), Some("1"));
        assert_eq!(result.header_names(), vec!["Content-Type", "X-Thing"]);
        assert_eq!(result.header("missing"), None);
    }
}
