// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Classification of blocked responses by the protection service in front of the site.

use reqwest::header::HeaderMap;

/// Known anti-bot / WAF services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntiBotService {
    Cloudflare,
    Akamai,
    AwsWaf,
    Incapsula,
    DataDome,
    Sucuri,
    PerimeterX,
}

impl AntiBotService {
    pub fn label(&self) -> &'static str {
        match self {
            AntiBotService::Cloudflare => "Cloudflare",
            AntiBotService::Akamai => "Akamai",
            AntiBotService::AwsWaf => "AWS WAF",
            AntiBotService::Incapsula => "Imperva/Incapsula",
            AntiBotService::DataDome => "DataDome",
            AntiBotService::Sucuri => "Sucuri",
            AntiBotService::PerimeterX => "PerimeterX",
        }
    }
}

impl std::fmt::Display for AntiBotService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identify the protection service from response headers.
///
/// Checks run in a fixed order and the first match wins. A header counts as
/// present only when it has a non-empty value.
pub fn detect_anti_bot_service(headers: &HeaderMap) -> Option<AntiBotService> {
    let server = header_value(headers, "server");

    if server == "cloudflare" || has_header(headers, "cf-ray") {
        return Some(AntiBotService::Cloudflare);
    }
    if has_header(headers, "x-akamai-transformed") || has_header(headers, "x-akamai-session-info")
    {
        return Some(AntiBotService::Akamai);
    }
    if has_header(headers, "x-amzn-requestid") || has_header(headers, "x-amzn-trace-id") {
        return Some(AntiBotService::AwsWaf);
    }
    if has_header(headers, "x-iinfo") || header_value(headers, "x-cdn") == "Incapsula" {
        return Some(AntiBotService::Incapsula);
    }
    if has_header(headers, "x-datadome") {
        return Some(AntiBotService::DataDome);
    }
    if has_header(headers, "x-sucuri-id") || has_header(headers, "x-sucuri-cache") {
        return Some(AntiBotService::Sucuri);
    }
    if server.contains("PerimeterX") {
        return Some(AntiBotService::PerimeterX);
    }

    None
}

/// First value of a header, or "" when missing or not valid visible ASCII
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn has_header(headers: &HeaderMap, name: &str) -> bool {
    headers.get(name).is_some_and(|v| !v.is_empty())
}
