//! Plain-text rendering of the session
//!
//! Everything renders to a `String` so the REPL decides where it goes.

use std::fmt::Write;

use shared_types::{Analysis, ChatMessage, ChatRole, DocumentInfo, HealthResponse, Risk};

use crate::session::{Phase, Session, Tab};

const RULE: &str = "------------------------------------------------------------";

pub fn help() -> String {
    [
        "Commands:",
        "  /upload <path>   upload and analyze a PDF",
        "  /tab <name>      show summary, clauses, obligations or risks",
        "  /info            details of the current document",
        "  /history         show the conversation so far",
        "  /health          check the server",
        "  /help            show this help",
        "  /quit            exit",
        "Anything else is sent as a question about the current document.",
    ]
    .join("\n")
}

/// Status line for the current phase, plus the error banner if any
pub fn status(session: &Session) -> String {
    let mut out = String::new();
    if let Some(error) = session.upload_error() {
        let _ = writeln!(out, "[error] {error}");
    }
    match session.phase() {
        Phase::Idle => out.push_str("No document loaded. Use /upload <path> to analyze a PDF."),
        Phase::Uploading { filename } => {
            let _ = write!(out, "Analyzing {filename}... this may take a moment.");
        }
        Phase::Analyzed => {
            if let Some(document) = session.document() {
                let _ = write!(
                    out,
                    "{} analyzed ({} characters). Ask a question or switch tabs with /tab.",
                    document.filename, document.text_length
                );
            }
        }
    }
    out
}

/// Tab bar with the active tab bracketed
pub fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The active tab of the analysis, under its tab bar
pub fn analysis_view(session: &Session) -> Option<String> {
    let document = session.document()?;
    let tab = session.active_tab();
    let mut out = String::new();
    let _ = writeln!(out, "{}", tab_bar(tab));
    let _ = writeln!(out, "{RULE}");
    out.push_str(&tab_body(&document.analysis, tab));
    Some(out)
}

pub fn tab_body(analysis: &Analysis, tab: Tab) -> String {
    match tab {
        Tab::Summary => analysis.summary.clone(),
        Tab::Clauses => render_clauses(analysis),
        Tab::Obligations => render_obligations(analysis),
        Tab::Risks => render_risks(analysis),
    }
}

fn render_clauses(analysis: &Analysis) -> String {
    if analysis.key_clauses.is_empty() {
        return "No key clauses identified.".to_string();
    }
    let mut out = String::new();
    for (i, clause) in analysis.key_clauses.iter().enumerate() {
        let _ = write!(out, "{}. {}", i + 1, clause.clause);
        if let Some(location) = &clause.location {
            let _ = write!(out, " ({location})");
        }
        let _ = writeln!(out, "\n   {}", clause.explanation);
    }
    out.trim_end().to_string()
}

fn render_obligations(analysis: &Analysis) -> String {
    if analysis.obligations.is_empty() {
        return "No obligations identified.".to_string();
    }
    let mut out = String::new();
    for obligation in &analysis.obligations {
        let _ = writeln!(out, "- {}: {}", obligation.party, obligation.obligation);
        if let Some(consequence) = &obligation.consequence {
            let _ = writeln!(out, "  If not met: {consequence}");
        }
    }
    out.trim_end().to_string()
}

/// Risks, most severe first, followed by unusual terms
fn render_risks(analysis: &Analysis) -> String {
    let mut out = String::new();

    if analysis.risks.is_empty() {
        out.push_str("No risks identified.\n");
    } else {
        let mut risks: Vec<&Risk> = analysis.risks.iter().collect();
        risks.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));
        for risk in risks {
            let _ = writeln!(
                out,
                "[{}] {}: {}",
                risk.severity.as_str().to_uppercase(),
                risk.risk_type,
                risk.description
            );
        }
    }

    if !analysis.unusual_terms.is_empty() {
        let _ = writeln!(out, "\nUnusual terms:");
        for term in &analysis.unusual_terms {
            let _ = writeln!(out, "- {}: {}", term.term, term.explanation);
            if let Some(recommendation) = &term.recommendation {
                let _ = writeln!(out, "  Recommendation: {recommendation}");
            }
        }
    }

    out.trim_end().to_string()
}

pub fn chat_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("You> {}", message.content),
        ChatRole::Assistant => format!("Assistant> {}", message.content),
    }
}

/// Whole transcript followed by the error notice, if any
pub fn transcript(session: &Session) -> String {
    if session.transcript().is_empty() && session.chat_error().is_none() {
        return "No messages yet.".to_string();
    }
    let mut lines: Vec<String> = session.transcript().iter().map(chat_message).collect();
    if let Some(notice) = session.chat_error() {
        lines.push(format!("Assistant> {notice}"));
    }
    lines.join("\n")
}

/// What to print after a chat round trip: the answer or the error notice
pub fn chat_outcome(session: &Session) -> String {
    if let Some(notice) = session.chat_error() {
        return format!("Assistant> {notice}");
    }
    session
        .transcript()
        .last()
        .map(chat_message)
        .unwrap_or_default()
}

pub fn document_info(info: &DocumentInfo) -> String {
    format!(
        "{}\n  id:         {}\n  uploaded:   {}\n  pages:      {}\n  size:       {} bytes\n  characters: {}\n  sha256:     {}\n\n{}",
        info.filename,
        info.document_id,
        info.uploaded_at,
        info.page_count,
        info.file_size,
        info.text_length,
        info.sha256,
        info.text_preview
    )
}

pub fn health(health: &HealthResponse) -> String {
    format!(
        "{} {} is {} (LLM {}, {} document(s) stored)",
        health.service,
        health.version,
        health.status,
        if health.llm_configured {
            "configured"
        } else {
            "not configured"
        },
        health.documents_stored
    )
}
