// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for clinic staff running the report tool.
//
// Every technical error is mapped to plain English with a clear suggestion.

use std::io::ErrorKind;

use crate::error::ReportError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk full or similar — running again later may work.
    Transient,
    /// User must fix an input (file path, field value, permissions).
    ActionRequired,
    /// Internal failure that no input change will fix.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `ReportError` into a `HumanError`.
pub fn humanize_error(err: &ReportError) -> HumanError {
    match err {
        ReportError::ImageRead { path, .. } => HumanError {
            message: "The hospital logo couldn't be opened.".into(),
            suggestion: format!(
                "Check that {} exists and is a PNG or JPEG image.",
                path.display()
            ),
            severity: Severity::ActionRequired,
        },

        ReportError::ImageWrite { path, .. } => HumanError {
            message: "The round logo couldn't be saved.".into(),
            suggestion: format!(
                "Check that the folder for {} exists and that you can write to it.",
                path.display()
            ),
            severity: Severity::ActionRequired,
        },

        ReportError::Image(_) => HumanError {
            message: "There's a problem with the logo image.".into(),
            suggestion: "Try saving the logo as a PNG first.".into(),
            severity: Severity::Permanent,
        },

        ReportError::Layout { stage, .. } => HumanError {
            message: format!("The report couldn't be laid out ({stage})."),
            suggestion: "Check that field's value. Long texts may not fit on one page.".into(),
            severity: Severity::ActionRequired,
        },

        ReportError::Write { path, source } => humanize_io(source, &path.display().to_string()),

        ReportError::Pdf(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged or not a PDF at all.".into(),
            severity: Severity::Permanent,
        },

        ReportError::Config(detail) => HumanError {
            message: "The report settings aren't valid.".into(),
            suggestion: format!("Fix the configuration file: {detail}"),
            severity: Severity::ActionRequired,
        },

        ReportError::Io(io_err) => humanize_io(io_err, "the file"),

        ReportError::Serialization(_) => HumanError {
            message: "The request file isn't valid JSON.".into(),
            suggestion: "Check for missing quotes, commas or fields.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

fn humanize_io(io_err: &std::io::Error, target: &str) -> HumanError {
    match io_err.kind() {
        ErrorKind::NotFound => HumanError {
            message: "A file or folder couldn't be found.".into(),
            suggestion: format!("Check the path of {target}."),
            severity: Severity::ActionRequired,
        },
        ErrorKind::PermissionDenied => HumanError {
            message: "Permission denied.".into(),
            suggestion: format!("You don't have permission to write {target}."),
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "There was a problem reading or writing a file.".into(),
            suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_logo_is_action_required() {
        let err = ReportError::image_read("Logo.png", "No such file or directory");
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("Logo.png"));
    }

    #[test]
    fn layout_message_names_stage() {
        let human = humanize_error(&ReportError::layout("medicines", "expected a list"));
        assert!(human.message.contains("medicines"));
    }

    #[test]
    fn write_permission_denied() {
        let err = ReportError::write(
            "/root/report.pdf",
            std::io::Error::from(ErrorKind::PermissionDenied),
        );
        let human = humanize_error(&err);
        assert_eq!(human.message, "Permission denied.");
        assert!(human.suggestion.contains("/root/report.pdf"));
    }

    #[test]
    fn other_io_is_transient() {
        let err = ReportError::Io(std::io::Error::other("disk full"));
        assert_eq!(humanize_error(&err).severity, Severity::Transient);
    }
}
