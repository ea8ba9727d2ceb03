//! Tour markup — parse a markdown tour file into tour entries.
//!
//! Format: one `##` heading per step, naming the target selector. An
//! optional `class: <name>` line right under the heading sets the step
//! badge's placement class; the remaining lines are the step content.
//! A single `#` heading, if present, is the tour title.
//!
//! ```text
//! # Getting around
//!
//! ## #search
//! class: tlypageguide_left
//! Type here to search every project.
//!
//! ## .toolbar .save
//! Saves the current draft.
//! ```

use std::path::Path;

use crate::types::target::TourEntry;


#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourMarkup {
    pub title: Option<String>,
    pub entries: Vec<TourEntry>,
}


impl TourMarkup {
    pub fn from_markdown(input: &str) -> TourMarkup {
        let mut title = None;
        let mut entries = Vec::new();
        let mut current_target: Option<String> = None;
        let mut current_body = String::new();

        for line in input.lines() {
            if let Some(heading) = line.strip_prefix("## ") {
                if let Some(target) = current_target.take() {
                    entries.extend(parse_step_body(&target, &current_body));
                }
                current_target = Some(heading.trim().to_string());
                current_body.clear();
            } else if let Some(heading) = line.strip_prefix("# ") {
                if title.is_none() && current_target.is_none() {
                    title = Some(heading.trim().to_string());
                }
            } else if current_target.is_some() {
                current_body.push_str(line);
                current_body.push('\n');
            }
        }

        if let Some(target) = current_target.take() {
            entries.extend(parse_step_body(&target, &current_body));
        }

        TourMarkup { title, entries }
    }

    pub fn from_file(path: &Path) -> std::io::Result<TourMarkup> {
        Ok(Self::from_markdown(&std::fs::read_to_string(path)?))
    }
}


/// Parse the lines under one `##` heading. Steps without content are
/// dropped.
fn parse_step_body(target: &str, body: &str) -> Option<TourEntry> {
    let mut lines = body.lines().skip_while(|l| l.trim().is_empty()).peekable();

    let position_class = match lines.peek() {
        Some(first) if first.trim().starts_with("class:") => {
            let class = first.trim()["class:".len()..].trim().to_string();
            lines.next();
            Some(class).filter(|c| !c.is_empty())
        }
        _ => None,
    };

    let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    if content.is_empty() {
        return None;
    }
    Some(TourEntry {
        target: target.to_string(),
        position_class,
        content,
    })
}
