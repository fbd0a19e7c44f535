//! Advanced scan options and their persistence
//!
//! This module provides:
//! - The `ScanOptions` value object with its hardcoded defaults
//! - `ScanOptionsPatch` for partial, field-by-field edits
//! - `ScanConfigStore` for the load-merge-save cycle across sessions

pub mod store;

pub use store::{SaveOutcome, ScanConfigStore, SCAN_OPTIONS_KEY};

use crate::error::OobeeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of scan to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanType {
    /// Crawl a website starting from its entry URL
    #[default]
    WebsiteCrawl,
}

impl ScanType {
    /// All accepted names, in declaration order
    pub const NAMES: &'static [&'static str] = &["website-crawl"];

    /// Stable name used in records and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebsiteCrawl => "website-crawl",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanType {
    type Err = OobeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "website-crawl" | "website" | "crawl" => Ok(Self::WebsiteCrawl),
            _ => Err(OobeeError::InvalidOption {
                option: "scan-type".to_string(),
                value: s.to_string(),
                expected: Self::NAMES.iter().map(|n| n.to_string()).collect(),
            }),
        }
    }
}

/// Device viewport the scan emulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Viewport {
    /// Desktop browser window
    #[default]
    Desktop,
    /// Mobile device screen
    Mobile,
}

impl Viewport {
    /// All accepted names, in declaration order
    pub const NAMES: &'static [&'static str] = &["desktop", "mobile"];

    /// Stable name used in records and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Viewport {
    type Err = OobeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            _ => Err(OobeeError::InvalidOption {
                option: "viewport".to_string(),
                value: s.to_string(),
                expected: Self::NAMES.iter().map(|n| n.to_string()).collect(),
            }),
        }
    }
}

/// User-chosen advanced scan options
///
/// Serialized as a flat JSON object with exactly six fields. Unknown fields
/// are ignored on read and missing fields take their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    /// Kind of scan
    pub scan_type: ScanType,
    /// Emulated viewport
    pub viewport: Viewport,
    /// Capture screenshots of failing elements
    pub include_screenshots: bool,
    /// Follow links into subdomains while crawling
    pub include_subdomains: bool,
    /// Also evaluate WCAG level AAA criteria
    #[serde(rename = "enableWcagAAA")]
    pub enable_wcag_aaa: bool,
    /// Run custom (non-WCAG) checks
    pub custom_checks: bool,
}

impl ScanOptions {
    /// Apply `patch` field by field; fields the patch leaves out keep
    /// their current value.
    ///
    /// # Examples
    ///
    /// ```
    /// use oobee_scan::options::{ScanOptions, ScanOptionsPatch, Viewport};
    ///
    /// let current = ScanOptions {
    ///     include_screenshots: true,
    ///     ..ScanOptions::default()
    /// };
    /// let merged = current.merge(&ScanOptionsPatch::new().viewport(Viewport::Mobile));
    ///
    /// assert_eq!(merged.viewport, Viewport::Mobile);
    /// assert!(merged.include_screenshots);
    /// assert_eq!(current.merge(&ScanOptionsPatch::new()), current);
    /// ```
    pub fn merge(&self, patch: &ScanOptionsPatch) -> ScanOptions {
        ScanOptions {
            scan_type: patch.scan_type.unwrap_or(self.scan_type),
            viewport: patch.viewport.unwrap_or(self.viewport),
            include_screenshots: patch
                .include_screenshots
                .unwrap_or(self.include_screenshots),
            include_subdomains: patch.include_subdomains.unwrap_or(self.include_subdomains),
            enable_wcag_aaa: patch.enable_wcag_aaa.unwrap_or(self.enable_wcag_aaa),
            custom_checks: patch.custom_checks.unwrap_or(self.custom_checks),
        }
    }

    /// Field names and display values, in record order
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            ("scanType", self.scan_type.to_string()),
            ("viewport", self.viewport.to_string()),
            ("includeScreenshots", self.include_screenshots.to_string()),
            ("includeSubdomains", self.include_subdomains.to_string()),
            ("enableWcagAAA", self.enable_wcag_aaa.to_string()),
            ("customChecks", self.custom_checks.to_string()),
        ]
    }
}

/// Partial edit of `ScanOptions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptionsPatch {
    /// New scan type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<ScanType>,
    /// New viewport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    /// New screenshot setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_screenshots: Option<bool>,
    /// New subdomain setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    /// New WCAG AAA setting
    #[serde(rename = "enableWcagAAA", skip_serializing_if = "Option::is_none")]
    pub enable_wcag_aaa: Option<bool>,
    /// New custom checks setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_checks: Option<bool>,
}

impl ScanOptionsPatch {
    /// Empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set the scan type
    pub fn scan_type(mut self, scan_type: ScanType) -> Self {
        self.scan_type = Some(scan_type);
        self
    }

    /// Set the viewport
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Set screenshot capture
    pub fn include_screenshots(mut self, value: bool) -> Self {
        self.include_screenshots = Some(value);
        self
    }

    /// Set subdomain crawling
    pub fn include_subdomains(mut self, value: bool) -> Self {
        self.include_subdomains = Some(value);
        self
    }

    /// Set WCAG AAA evaluation
    pub fn enable_wcag_aaa(mut self, value: bool) -> Self {
        self.enable_wcag_aaa = Some(value);
        self
    }

    /// Set custom checks
    pub fn custom_checks(mut self, value: bool) -> Self {
        self.custom_checks = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_options_are_desktop_crawl_with_everything_off() {
        let options = ScanOptions::default();
        assert_eq!(options.scan_type, ScanType::WebsiteCrawl);
        assert_eq!(options.viewport, Viewport::Desktop);
        assert!(!options.include_screenshots);
        assert!(!options.include_subdomains);
        assert!(!options.enable_wcag_aaa);
        assert!(!options.custom_checks);
    }

    #[test]
    fn test_serialized_record_has_exactly_six_camel_case_fields() {
        let json = serde_json::to_value(ScanOptions::default()).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "customChecks",
                "enableWcagAAA",
                "includeScreenshots",
                "includeSubdomains",
                "scanType",
                "viewport",
            ]
        );
        assert_eq!(object["scanType"], "website-crawl");
        assert_eq!(object["viewport"], "desktop");
    }

    #[test]
    fn test_deserialize_ignores_unknown_and_defaults_missing_fields() {
        let options: ScanOptions =
            serde_json::from_str(r#"{"viewport":"mobile","theme":"dark"}"#).unwrap();

        assert_eq!(
            options,
            ScanOptions {
                viewport: Viewport::Mobile,
                ..ScanOptions::default()
            }
        );
    }

    #[test]
    fn test_merge_keeps_unrelated_fields_from_current() {
        let current = ScanOptions {
            include_subdomains: true,
            custom_checks: true,
            ..ScanOptions::default()
        };

        let merged = current.merge(&ScanOptionsPatch::new().enable_wcag_aaa(true));

        assert!(merged.enable_wcag_aaa);
        assert!(merged.include_subdomains);
        assert!(merged.custom_checks);
    }

    #[test]
    fn test_merge_can_turn_fields_off() {
        let current = ScanOptions {
            include_screenshots: true,
            ..ScanOptions::default()
        };

        let merged = current.merge(&ScanOptionsPatch::new().include_screenshots(false));
        assert!(!merged.include_screenshots);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ScanOptionsPatch::new().is_empty());
        assert!(!ScanOptionsPatch::new().custom_checks(false).is_empty());
    }

    #[test]
    fn test_patch_deserializes_from_partial_record() {
        let patch: ScanOptionsPatch =
            serde_json::from_str(r#"{"enableWcagAAA":true}"#).unwrap();
        assert_eq!(patch, ScanOptionsPatch::new().enable_wcag_aaa(true));
    }

    #[test]
    fn test_viewport_from_str_is_case_insensitive() {
        assert_eq!("Mobile".parse::<Viewport>().unwrap(), Viewport::Mobile);
        assert_eq!("DESKTOP".parse::<Viewport>().unwrap(), Viewport::Desktop);
    }

    #[test]
    fn test_viewport_from_str_rejects_unknown_values() {
        let err = "tablet".parse::<Viewport>().unwrap_err();
        assert!(err.to_string().contains("tablet"));
        assert!(err.suggestion().unwrap().contains("mobile"));
    }

    #[test]
    fn test_scan_type_accepts_aliases() {
        for name in ["website-crawl", "website", "crawl"] {
            assert_eq!(name.parse::<ScanType>().unwrap(), ScanType::WebsiteCrawl);
        }
        assert!("api".parse::<ScanType>().is_err());
    }

    fn arb_options() -> impl Strategy<Value = ScanOptions> {
        (
            prop_oneof![Just(Viewport::Desktop), Just(Viewport::Mobile)],
            any::<[bool; 4]>(),
        )
            .prop_map(|(viewport, flags)| ScanOptions {
                scan_type: ScanType::WebsiteCrawl,
                viewport,
                include_screenshots: flags[0],
                include_subdomains: flags[1],
                enable_wcag_aaa: flags[2],
                custom_checks: flags[3],
            })
    }

    proptest! {
        /// Property: merging an empty patch is the identity
        #[test]
        fn prop_merge_empty_patch_is_identity(current in arb_options()) {
            prop_assert_eq!(current.merge(&ScanOptionsPatch::new()), current);
        }

        /// Property: a patch built from a full value replaces everything
        #[test]
        fn prop_merge_full_patch_yields_patch_values(
            current in arb_options(),
            target in arb_options()
        ) {
            let patch = ScanOptionsPatch::new()
                .scan_type(target.scan_type)
                .viewport(target.viewport)
                .include_screenshots(target.include_screenshots)
                .include_subdomains(target.include_subdomains)
                .enable_wcag_aaa(target.enable_wcag_aaa)
                .custom_checks(target.custom_checks);
            prop_assert_eq!(current.merge(&patch), target);
        }
    }
}
