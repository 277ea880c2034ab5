// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Clip model: one segment of a mashup.
//!
//! A clip is a source URL plus a time window inside that source. User input
//! arrives as a [`ClipDraft`] whose times may be numbers or numeric strings;
//! validating the draft yields [`ClipFields`], the checked form stored in the
//! playlist.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MashupError, Result};

/// Marker appended to the title of a duplicated clip
pub const DEFAULT_COPY_SUFFIX: &str = " (Copy)";

/// Unique clip identifier, assigned by the playlist store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(u64);

impl ClipId {
    /// Wrap a raw id value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A time as typed by the user: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Already numeric
    Number(f64),
    /// Text to be parsed; empty means zero
    Text(String),
}

impl Default for TimeValue {
    fn default() -> Self {
        TimeValue::Number(0.0)
    }
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        TimeValue::Number(value)
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Text(value.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Text(value)
    }
}

impl TimeValue {
    /// Coerce to seconds, rejecting anything that is not a finite number
    pub fn to_seconds(&self, field: &str) -> Result<f64> {
        let seconds = match self {
            TimeValue::Number(v) => *v,
            TimeValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().map_err(|_| {
                        MashupError::invalid_clip(format!("{} is not a number: {:?}", field, s))
                    })?
                }
            }
        };

        if !seconds.is_finite() {
            return Err(MashupError::invalid_clip(format!(
                "{} must be finite, got {}",
                field, seconds
            )));
        }
        Ok(seconds)
    }
}

/// Unvalidated clip input, as it comes from a form or an imported document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipDraft {
    /// Source video URL
    #[serde(alias = "url")]
    pub source_url: String,
    /// Start offset in seconds
    #[serde(default)]
    pub start_time: TimeValue,
    /// End offset in seconds
    #[serde(default)]
    pub end_time: TimeValue,
    /// Optional display label
    #[serde(default)]
    pub title: Option<String>,
}

impl ClipDraft {
    /// Create a draft from a URL and a time window
    pub fn new(
        source_url: impl Into<String>,
        start_time: impl Into<TimeValue>,
        end_time: impl Into<TimeValue>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            title: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check the draft and convert it to clip fields
    pub fn validate(&self) -> Result<ClipFields> {
        if self.source_url.trim().is_empty() {
            return Err(MashupError::invalid_clip("source URL is empty"));
        }

        let start_time = self.start_time.to_seconds("start time")?;
        if start_time < 0.0 {
            return Err(MashupError::invalid_clip(format!(
                "start time must not be negative, got {}",
                start_time
            )));
        }
        let end_time = self.end_time.to_seconds("end time")?;

        let title = self
            .title
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .cloned();

        Ok(ClipFields {
            source_url: self.source_url.clone(),
            start_time,
            end_time,
            title,
        })
    }
}

/// The validated, editable fields of a clip
///
/// This is also the shape of one item in a transfer document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipFields {
    /// Source video URL
    pub source_url: String,
    /// Start offset in seconds
    pub start_time: f64,
    /// End offset in seconds
    pub end_time: f64,
    /// Optional display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ClipFields {
    /// Segment length in seconds; zero or negative when the window is empty
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A playlist entry
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    id: ClipId,
    fields: ClipFields,
}

impl Clip {
    /// Create a clip with an already assigned id
    pub fn new(id: ClipId, fields: ClipFields) -> Self {
        Self { id, fields }
    }

    /// Get the clip id
    pub fn id(&self) -> ClipId {
        self.id
    }

    /// Get the clip fields
    pub fn fields(&self) -> &ClipFields {
        &self.fields
    }

    /// Replace every field, keeping the id
    pub fn set_fields(&mut self, fields: ClipFields) {
        self.fields = fields;
    }

    /// Get the source URL
    pub fn source_url(&self) -> &str {
        &self.fields.source_url
    }

    /// Get the start offset in seconds
    pub fn start_time(&self) -> f64 {
        self.fields.start_time
    }

    /// Get the end offset in seconds
    pub fn end_time(&self) -> f64 {
        self.fields.end_time
    }

    /// Get the title
    pub fn title(&self) -> Option<&str> {
        self.fields.title.as_deref()
    }

    /// Segment length in seconds
    pub fn duration(&self) -> f64 {
        self.fields.duration()
    }

    /// Title, or a positional fallback label
    pub fn display_title(&self, index: usize) -> String {
        match self.title() {
            Some(title) => title.to_string(),
            None => format!("Video {}", index + 1),
        }
    }

    /// Host part of the source URL, if it has one
    pub fn host(&self) -> Option<&str> {
        let url = self.source_url();
        let rest = url.split_once("://")?.1;
        let authority = rest.split(['/', '?', '#']).next()?;
        let host = authority.rsplit('@').next()?;
        let host = host.split(':').next()?;
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Copy this clip under a new id, marking the title as a copy
    pub fn duplicate(&self, id: ClipId, suffix: &str) -> Clip {
        let mut fields = self.fields.clone();
        if let Some(title) = fields.title.as_mut() {
            title.push_str(suffix);
        }
        Clip { id, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_numbers() {
        let fields = ClipDraft::new("https://youtu.be/abc", 10.0, 15.5)
            .with_title("Intro")
            .validate()
            .unwrap();
        assert_eq!(fields.source_url, "https://youtu.be/abc");
        assert_eq!(fields.start_time, 10.0);
        assert_eq!(fields.end_time, 15.5);
        assert_eq!(fields.title.as_deref(), Some("Intro"));
        assert_eq!(fields.duration(), 5.5);
    }

    #[test]
    fn test_validate_numeric_strings() {
        let fields = ClipDraft::new("A", " 1.25 ", "42").validate().unwrap();
        assert_eq!(fields.start_time, 1.25);
        assert_eq!(fields.end_time, 42.0);
    }

    #[test]
    fn test_empty_strings_default_to_zero() {
        let fields = ClipDraft::new("A", "", "").validate().unwrap();
        assert_eq!(fields.start_time, 0.0);
        assert_eq!(fields.end_time, 0.0);
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = ClipDraft::new("A", "ten", 5.0).validate().unwrap_err();
        assert!(matches!(err, MashupError::InvalidClip { .. }));

        let err = ClipDraft::new("A", 0.0, "5s").validate().unwrap_err();
        assert!(matches!(err, MashupError::InvalidClip { .. }));

        let err = ClipDraft::new("A", f64::NAN, 5.0).validate().unwrap_err();
        assert!(matches!(err, MashupError::InvalidClip { .. }));
    }

    #[test]
    fn test_rejects_empty_url_and_negative_start() {
        assert!(ClipDraft::new("  ", 0.0, 5.0).validate().is_err());
        assert!(ClipDraft::new("A", -1.0, 5.0).validate().is_err());
    }

    #[test]
    fn test_allows_inverted_window() {
        let fields = ClipDraft::new("A", 20.0, 5.0).validate().unwrap();
        assert!(fields.duration() < 0.0);
    }

    #[test]
    fn test_blank_title_is_none() {
        let fields = ClipDraft::new("A", 0.0, 1.0)
            .with_title("   ")
            .validate()
            .unwrap();
        assert_eq!(fields.title, None);
    }

    #[test]
    fn test_duplicate() {
        let fields = ClipDraft::new("A", 1.0, 2.0)
            .with_title("Drop")
            .validate()
            .unwrap();
        let clip = Clip::new(ClipId::new(1), fields);
        let copy = clip.duplicate(ClipId::new(2), DEFAULT_COPY_SUFFIX);

        assert_eq!(copy.id(), ClipId::new(2));
        assert_eq!(copy.title(), Some("Drop (Copy)"));
        assert_eq!(copy.source_url(), clip.source_url());
        assert_eq!(copy.start_time(), clip.start_time());
        assert_eq!(copy.end_time(), clip.end_time());

        let untitled = Clip::new(ClipId::new(3), ClipDraft::new("B", 0.0, 1.0).validate().unwrap());
        assert_eq!(untitled.duplicate(ClipId::new(4), DEFAULT_COPY_SUFFIX).title(), None);
    }

    #[test]
    fn test_display_title_and_host() {
        let clip = Clip::new(
            ClipId::new(1),
            ClipDraft::new("https://user@www.youtube.com:443/watch?v=x", 0.0, 1.0)
                .validate()
                .unwrap(),
        );
        assert_eq!(clip.display_title(2), "Video 3");
        assert_eq!(clip.host(), Some("www.youtube.com"));

        let bare = Clip::new(ClipId::new(2), ClipDraft::new("not a url", 0.0, 1.0).validate().unwrap());
        assert_eq!(bare.host(), None);
    }

    #[test]
    fn test_draft_from_json() {
        let draft: ClipDraft =
            serde_json::from_str(r#"{"url": "A", "startTime": "3", "endTime": 9}"#).unwrap();
        let fields = draft.validate().unwrap();
        assert_eq!(fields.source_url, "A");
        assert_eq!(fields.start_time, 3.0);
        assert_eq!(fields.end_time, 9.0);
        assert_eq!(fields.title, None);
    }
}
