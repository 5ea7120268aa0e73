//! Hit-rate file names
//!
//! A table file is named `{subject}_{target}_hit_rate.csv`, e.g.
//! `rogue_NPC_hit_rate.csv` holds the rogue's hit rate against NPCs.
//! The same two tokens name the rendered image and build its title.

use crate::constants::{INPUT_SUFFIX, OUTPUT_SUFFIX};
use crate::error::HeatmapError;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentifier {
    pub subject: String,
    pub target: String,
}

impl FileIdentifier {
    /// Parse a file name (or a path ending in one).
    pub fn parse(identifier: &str) -> Result<Self, HeatmapError> {
        let name = Path::new(identifier)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HeatmapError::parse(identifier, "no file name"))?;

        let stem = name.strip_suffix(INPUT_SUFFIX).ok_or_else(|| {
            HeatmapError::parse(identifier, format!("expected suffix {INPUT_SUFFIX}"))
        })?;

        let tokens: Vec<&str> = stem.split('_').collect();
        match tokens.as_slice() {
            [subject, target] if !subject.is_empty() && !target.is_empty() => Ok(Self {
                subject: subject.to_string(),
                target: target.to_string(),
            }),
            _ => Err(HeatmapError::parse(
                identifier,
                "expected exactly two non-empty tokens before the suffix",
            )),
        }
    }

    /// "Rogue hit rate against NPCs"
    pub fn title(&self) -> String {
        format!("{} hit rate against {}s", capitalize(&self.subject), self.target)
    }

    /// `{subject}_{target}_hit_rate.png`, target token unmodified
    pub fn output_file_name(&self) -> String {
        format!("{}_{}{}", self.subject, self.target, OUTPUT_SUFFIX)
    }
}

/// Upper-case the first character and lower-case the rest ("NPC" -> "Npc").
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
