//! Checklist suggestions from a text-generation service, with fixed
//! fallbacks whenever the service is missing or misbehaves.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::io::Write;
use std::process::{Command, Stdio};

pub trait TextGenerationService {
    fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Used when no credential is configured.
pub const DEFAULT_CHECKLIST: [&str; 6] = [
    "Visually inspect the equipment/area",
    "Check basic operation of the components",
    "Clean and sanitize surfaces and components",
    "Test operation after maintenance",
    "Check connections and fixings",
    "Record in the system with a photo",
];

/// Used when the service fails or answers with too few items.
pub const FALLBACK_CHECKLIST: [&str; 5] = [
    "Visually inspect",
    "Check operation",
    "Clean components",
    "Test operation",
    "Photograph and record",
];

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistSuggestion {
    pub checklist: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Runs an external command with the prompt on stdin; the credential is
/// passed in `HOTELMAINT_AI_KEY`.
pub struct CommandTextGenerator {
    command: String,
    api_key: String,
}

impl CommandTextGenerator {
    pub fn new(command: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            api_key: api_key.into(),
        }
    }
}

impl TextGenerationService for CommandTextGenerator {
    fn complete(&self, prompt: &str) -> AppResult<String> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AppError::Service("no ai_command configured".into()))?;

        let mut child = Command::new(program)
            .args(parts)
            .env("HOTELMAINT_AI_KEY", &self.api_key)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(AppError::Service(format!(
                "generator exited with {}",
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn build_prompt(sector: &str, location: &str, description: &str) -> String {
    format!(
        "You are a hotel maintenance specialist. Write a detailed preventive maintenance checklist.\n\
         Sector: {sector}\n\
         Location: {location}\n\
         Task: {description}\n\n\
         Answer ONLY with practical, specific check items, one per line, each starting with \"- \".\n\
         Include 6-10 relevant items with clear action verbs. No titles, no numbering."
    )
}

/// Keep the `- ` lines of a generated answer, stripped of the marker.
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| l.starts_with('-'))
        .map(|l| l.trim_start_matches('-').trim().to_string())
        .filter(|l| l.chars().count() > 3)
        .collect()
}

/// Ask `generator` for a checklist.
///
/// `None` means no credential is configured and yields [`DEFAULT_CHECKLIST`];
/// an error or an answer with fewer than three items yields
/// [`FALLBACK_CHECKLIST`].
pub fn suggest_checklist(
    generator: Option<&dyn TextGenerationService>,
    sector: &str,
    location: &str,
    description: &str,
) -> ChecklistSuggestion {
    let Some(generator) = generator else {
        return ChecklistSuggestion {
            checklist: DEFAULT_CHECKLIST.iter().map(|s| s.to_string()).collect(),
            message: Some("Using default checklist (no AI credential configured)".into()),
        };
    };

    match generator.complete(&build_prompt(sector, location, description)) {
        Ok(text) => {
            let items = parse_items(&text);
            if items.len() >= 3 {
                ChecklistSuggestion {
                    checklist: items,
                    message: None,
                }
            } else {
                tracing::warn!(items = items.len(), "too few generated items, using fallback");
                ChecklistSuggestion {
                    checklist: FALLBACK_CHECKLIST.iter().map(|s| s.to_string()).collect(),
                    message: None,
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "checklist generation failed");
            ChecklistSuggestion {
                checklist: FALLBACK_CHECKLIST.iter().map(|s| s.to_string()).collect(),
                message: Some("Using default checklist (AI unavailable)".into()),
            }
        }
    }
}
