// Core types shared by the editing subsystem

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// An encoded raster image together with its mime type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build from a base64 payload, as carried by inline API parts
    pub fn from_base64(mime_type: impl Into<String>, data: &str) -> Result<Self, DataUrlError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| DataUrlError::Payload(e.to_string()))?;
        Ok(Self::new(mime_type, bytes))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// A header without a mime type falls back to `image/jpeg`.
    pub fn from_data_url(url: &str) -> Result<Self, DataUrlError> {
        let (header, payload) = url.split_once(',').ok_or(DataUrlError::MissingPayload)?;
        let header = header.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
        let mime_type = header
            .split(';')
            .next()
            .filter(|m| !m.is_empty())
            .unwrap_or("image/jpeg");
        Self::from_base64(mime_type, payload)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// File extension matching the mime type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            _ => "png",
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DataUrlError {
    #[error("Not a data URL")]
    NotDataUrl,

    #[error("Data URL has no payload")]
    MissingPayload,

    #[error("Invalid base64 payload: {0}")]
    Payload(String),
}

/// Current busy status of an editing session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Activity {
    pub busy: bool,
    /// Progress text shown while busy
    pub label: Option<String>,
    /// Session generation the status belongs to
    pub generation: u64,
}

impl Activity {
    pub fn idle(generation: u64) -> Self {
        Self {
            busy: false,
            label: None,
            generation,
        }
    }

    pub fn busy(generation: u64, label: impl Into<String>) -> Self {
        Self {
            busy: true,
            label: Some(label.into()),
            generation,
        }
    }
}

/// Transitions published by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Busy { generation: u64, label: String },
    Idle { generation: u64 },
    HistoryChanged {
        generation: u64,
        len: usize,
        cursor: Option<usize>,
    },
    Error { generation: u64, message: String },
    Reset { generation: u64 },
}

/// What happened to the result of a collaborator call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Result committed; the history cursor now points here
    Applied { cursor: usize },
    /// The session was reset while the call was in flight
    Discarded,
}

/// A downloadable rendition of an image
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: String,
    pub image: Arc<ImageData>,
}

impl Download {
    pub fn new(image: Arc<ImageData>, prefix: &str, at: DateTime<Utc>) -> Self {
        let file_name = format!("{}_{}.{}", prefix, at.timestamp_millis(), image.extension());
        Self { file_name, image }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.image.bytes
    }
}
