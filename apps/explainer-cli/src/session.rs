//! Client session state machine
//!
//! A session moves `Idle -> Uploading -> Analyzed`. A failed upload falls
//! back to `Idle` with an error banner; starting a new upload from
//! `Analyzed` discards the previous analysis, transcript and tab selection.
//! Only one chat request may be outstanding at a time.

use std::fmt;
use std::str::FromStr;

use shared_types::{Analysis, ChatMessage, ChatRequest, ChatResponse, UploadResponse};
use thiserror::Error;

/// Prefix of the notice shown when a chat request fails
pub const CHAT_ERROR_PREFIX: &str = "Sorry, I encountered an error: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Uploading { filename: String },
    Analyzed,
}

/// Which part of the analysis is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Summary,
    Clauses,
    Obligations,
    Risks,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Summary, Tab::Clauses, Tab::Obligations, Tab::Risks];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::Clauses => "Key Clauses",
            Tab::Obligations => "Obligations",
            Tab::Risks => "Risks",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Summary => "summary",
            Tab::Clauses => "clauses",
            Tab::Obligations => "obligations",
            Tab::Risks => "risks",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(Tab::Summary),
            "clauses" | "key_clauses" | "key-clauses" => Ok(Tab::Clauses),
            "obligations" => Ok(Tab::Obligations),
            "risks" => Ok(Tab::Risks),
            other => Err(SessionError::UnknownTab(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please wait for the current request to finish")]
    Busy,

    #[error("Upload a document first")]
    NoDocument,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Unknown tab '{0}' (expected summary, clauses, obligations or risks)")]
    UnknownTab(String),
}

/// The analyzed document currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document_id: String,
    pub filename: String,
    pub text_length: usize,
    pub analysis: Analysis,
}

impl From<UploadResponse> for LoadedDocument {
    fn from(response: UploadResponse) -> Self {
        Self {
            document_id: response.document_id,
            filename: response.filename,
            text_length: response.text_length,
            analysis: response.analysis,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    document: Option<LoadedDocument>,
    active_tab: Tab,
    transcript: Vec<ChatMessage>,
    chat_pending: bool,
    upload_error: Option<String>,
    chat_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            document: None,
            active_tab: Tab::default(),
            transcript: Vec::new(),
            chat_pending: false,
            upload_error: None,
            chat_error: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_chat_pending(&self) -> bool {
        self.chat_pending
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    pub fn chat_error(&self) -> Option<&str> {
        self.chat_error.as_deref()
    }

    /// Enter `Uploading`, dropping any previous document and its chat
    pub fn begin_upload(&mut self, filename: impl Into<String>) -> Result<(), SessionError> {
        if matches!(self.phase, Phase::Uploading { .. }) || self.chat_pending {
            return Err(SessionError::Busy);
        }

        self.phase = Phase::Uploading {
            filename: filename.into(),
        };
        self.document = None;
        self.active_tab = Tab::default();
        self.transcript.clear();
        self.upload_error = None;
        self.chat_error = None;
        Ok(())
    }

    /// Apply the outcome of the upload started by [`Session::begin_upload`].
    /// Ignored when no upload is in progress.
    pub fn finish_upload(&mut self, outcome: Result<UploadResponse, String>) {
        if !matches!(self.phase, Phase::Uploading { .. }) {
            return;
        }

        match outcome {
            Ok(response) => {
                self.document = Some(response.into());
                self.phase = Phase::Analyzed;
            }
            Err(message) => {
                self.upload_error = Some(message);
                self.phase = Phase::Idle;
            }
        }
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), SessionError> {
        if self.phase != Phase::Analyzed {
            return Err(SessionError::NoDocument);
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Record the user's message and build the request to send.
    ///
    /// The message joins the transcript immediately; the answer is appended
    /// by [`Session::finish_chat`].
    pub fn begin_chat(&mut self, message: &str) -> Result<ChatRequest, SessionError> {
        let document_id = match (&self.phase, &self.document) {
            (Phase::Analyzed, Some(document)) => document.document_id.clone(),
            (Phase::Uploading { .. }, _) => return Err(SessionError::Busy),
            _ => return Err(SessionError::NoDocument),
        };
        if self.chat_pending {
            return Err(SessionError::Busy);
        }

        let message = message.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.chat_error = None;
        self.transcript.push(ChatMessage::user(message));
        self.chat_pending = true;

        Ok(ChatRequest {
            message: message.to_string(),
            document_id,
        })
    }

    /// Apply the outcome of the chat started by [`Session::begin_chat`].
    /// A failure leaves the transcript as-is and sets the error notice.
    pub fn finish_chat(&mut self, outcome: Result<ChatResponse, String>) {
        if !self.chat_pending {
            return;
        }
        self.chat_pending = false;

        match outcome {
            Ok(response) => {
                self.transcript
                    .push(ChatMessage::assistant(response.response, response.timestamp));
            }
            Err(message) => {
                self.chat_error = Some(format!("{CHAT_ERROR_PREFIX}{message}"));
            }
        }
    }
}
