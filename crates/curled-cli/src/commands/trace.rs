//! Trace command - print a redirect chain

use anyhow::{Context, Result};
use curled_runtime::{track_location, Session};

/// Print each URL visited from `url`, one per line
pub fn run(session: &mut Session, url: &str) -> Result<()> {
    let chain = track_location(url, &[], Some(session))
        .with_context(|| format!("Failed to trace {}", url))?;

    for (hop, location) in chain.iter().enumerate() {
        println!("{:>2}  {}", hop, location);
    }
    Ok(())
}
