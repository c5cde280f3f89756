// crates/restbind-core/src/core/providers.rs
// ============================================================================
// Module: Media Providers
// Description: Serialization handlers attached to built proxies.
// Purpose: Make the provider list an explicit, configurable input.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ProviderList`] is the ordered set of media providers a proxy may use to
//! encode requests and decode responses. The default list holds the JSON
//! provider only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Media Provider
// ============================================================================

/// Serialization handler supported by proxies.
///
/// # Invariants
/// - Variants are stable for configuration and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaProvider {
    /// JSON bodies (`application/json`).
    Json,
    /// Plain text bodies (`text/plain`).
    #[serde(rename = "text")]
    PlainText,
}

impl MediaProvider {
    /// Returns the stable configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::PlainText => "text",
        }
    }

    /// Returns the media type handled by the provider.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for MediaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a provider label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for MediaProvider {
    type Err = UnknownProvider;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::PlainText),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Provider List
// ============================================================================

/// Ordered provider set attached to a proxy.
///
/// # Invariants
/// - Providers appear at most once, in first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderList(Vec<MediaProvider>);

impl ProviderList {
    /// Builds a list from providers, dropping duplicates.
    #[must_use]
    pub fn new(providers: impl IntoIterator<Item = MediaProvider>) -> Self {
        let mut list = Self(Vec::new());
        for provider in providers {
            list.push(provider);
        }
        list
    }

    /// Appends a provider unless it is already present.
    pub fn push(&mut self, provider: MediaProvider) {
        if !self.0.contains(&provider) {
            self.0.push(provider);
        }
    }

    /// Returns true when the provider is attached.
    #[must_use]
    pub fn contains(&self, provider: MediaProvider) -> bool {
        self.0.contains(&provider)
    }

    /// Returns true when no providers are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates providers in order.
    pub fn iter(&self) -> impl Iterator<Item = MediaProvider> + '_ {
        self.0.iter().copied()
    }

    /// Returns the provider labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|provider| provider.as_str().to_string()).collect()
    }
}

impl Default for ProviderList {
    fn default() -> Self {
        Self(vec![MediaProvider::Json])
    }
}

impl FromIterator<MediaProvider> for ProviderList {
    fn from_iter<I: IntoIterator<Item = MediaProvider>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ProviderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, provider) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(provider.as_str())?;
        }
        f.write_str("]")
    }
}
