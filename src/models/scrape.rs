// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Structured summary extracted from a single page.
///
/// Every field is always serialized; absent values are empty strings,
/// arrays or objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScrapedResult {
    /// The URL that was scraped, exactly as requested
    pub url: String,
    /// Text of the last `<title>` element, untrimmed
    pub title: String,
    /// Content of `<meta name="description">`
    pub description: String,
    /// Content of `<meta name="keywords">`
    pub keywords: String,
    /// Hyperlinks in document order
    pub links: Vec<Link>,
    /// Meta tags keyed by `name`, or by `property` when `name` is absent
    pub meta_tags: HashMap<String, String>,
    /// Image sources in document order
    pub images: Vec<String>,
    /// Non-empty headings in document order
    pub headings: Vec<Heading>,
}

impl ScrapedResult {
    /// Create an empty result for the given source URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// An extracted hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Resolved link target (or the raw reference if it could not be resolved)
    pub href: String,
    /// Trimmed text content of the anchor
    pub text: String,
}

/// An extracted `<h1>`..`<h6>` heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    /// Trimmed text content, never empty
    pub text: String,
}
