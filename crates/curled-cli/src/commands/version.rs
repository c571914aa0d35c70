//! Version command - describe the loaded libcurl

use anyhow::{Context, Result};
use curled_runtime::{library_version, library_version_info, Library, VersionInfo};

pub fn run(library: &Library, json: bool) -> Result<()> {
    let info = library_version_info(library).context("Failed to read libcurl version")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    for (component, version) in library_version(library) {
        if version.is_empty() {
            println!("{}", component);
        } else {
            println!("{} {}", component, version);
        }
    }
    print_details(&info);
    Ok(())
}

fn print_details(info: &VersionInfo) {
    let (major, minor, patch) = info.version_num;
    println!();
    println!("version:   {}.{}.{}", major, minor, patch);
    println!("host:      {}", info.host);
    if let Some(ssl) = &info.ssl_version {
        println!("ssl:       {}", ssl);
    }
    if let Some(libz) = &info.libz_version {
        println!("libz:      {}", libz);
    }
    println!("protocols: {}", info.protocols.join(" "));

    let enabled: Vec<&str> = info
        .features
        .iter()
        .filter(|(_, on)| **on)
        .map(|(name, _)| name.as_str())
        .collect();
    println!("features:  {}", enabled.join(" "));
}
