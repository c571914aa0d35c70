//! Fetch command - download a URL and print the response

use anyhow::{bail, Context, Result};
use curled_runtime::{fetch_url, Session, UrlResult};
use serde_json::json;
use std::io::{self, Write};

pub struct FetchArgs {
    pub url: String,
    /// Raw `Name: value` request headers
    pub headers: Vec<String>,
    pub include: bool,
    pub json: bool,
}

/// Download `args.url` on `session` and write it to stdout
pub fn run(session: &mut Session, args: FetchArgs) -> Result<()> {
    let headers = parse_headers(&args.headers)?;
    let pairs: Vec<(&str, &str)> = headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let result = fetch_url(&args.url, &pairs, Some(session))
        .with_context(|| format!("Failed to fetch {}", args.url))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&to_json(&result))?)?;
    } else {
        if args.include {
            write_head(&mut out, &result)?;
        }
        out.write_all(result.body())?;
    }
    out.flush()?;
    Ok(())
}

/// Split `Name: value` arguments
fn parse_headers(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|header| match header.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => bail!("Invalid header '{}': expected 'Name: value'", header),
        })
        .collect()
}

fn write_head(out: &mut impl Write, result: &UrlResult) -> io::Result<()> {
    writeln!(out, "HTTP {}", result.response_code)?;
    for (name, value) in &result.headers {
        writeln!(out, "{}: {}", name, value)?;
    }
    writeln!(out)
}

fn to_json(result: &UrlResult) -> serde_json::Value {
    json!({
        "url": result.url,
        "effective_url": result.effective_url,
        "response_code": result.response_code,
        "duration_ms": result.duration.as_millis() as u64,
        "headers": result.headers,
        "body": String::from_utf8_lossy(result.body()),
    })
}
