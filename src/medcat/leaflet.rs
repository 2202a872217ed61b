//! # Leaflet section editor adapter
//!
//! Bridges one leaflet section (an ordered list of plain-text paragraphs)
//! and a markdown block document. Loading joins the paragraphs with blank
//! lines and parses them into block events exactly once per editor
//! instance; saving serializes the blocks back to markdown, splits on line
//! breaks, trims, and drops empty lines.
//!
//! The round trip is deliberately lossy: a paragraph containing an internal
//! line break or block-level markdown may not reproduce byte-for-byte.
//! Only semantic paragraph content is preserved. That is the contract with
//! the leaflet fields, not a defect to fix here.

use crate::error::{MedcatError, Result};
use crate::model::LeafletSection;
use pulldown_cmark::{Event, Parser};
use pulldown_cmark_to_cmark::cmark;

/// Lifecycle of the one-shot load. The document is only ever populated
/// from the remote value while `Uninitialized`; afterwards the blocks are
/// the single source of truth until the caller saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loaded,
}

pub struct SectionEditor {
    section: LeafletSection,
    blocks: Vec<Event<'static>>,
    state: LoadState,
}

impl SectionEditor {
    pub fn new(section: LeafletSection) -> Self {
        Self {
            section,
            blocks: Vec::new(),
            state: LoadState::Uninitialized,
        }
    }

    pub fn section(&self) -> LeafletSection {
        self.section
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Populate the document from the section's current paragraphs.
    /// Runs at most once; repeat calls are no-ops so a re-render of the
    /// surrounding view cannot clobber in-progress edits.
    pub fn load(&mut self, paragraphs: &[String]) {
        if self.state == LoadState::Loaded {
            return;
        }
        let markdown = paragraphs.join("\n\n");
        self.blocks = parse_blocks(&markdown);
        self.state = LoadState::Loaded;
    }

    /// Replace the document from edited markdown. Called after every edit
    /// pass; unlike [`load`](Self::load) this is not guarded.
    pub fn replace(&mut self, markdown: &str) {
        self.blocks = parse_blocks(markdown);
        self.state = LoadState::Loaded;
    }

    /// Serialize the block document to markdown. Formatting that has no
    /// plain-paragraph representation is dropped on the way back in.
    pub fn markdown(&self) -> Result<String> {
        let mut buf = String::new();
        cmark(self.blocks.iter(), &mut buf)
            .map_err(|e| MedcatError::Api(format!("markdown serialization failed: {}", e)))?;
        Ok(buf)
    }

    /// The section value to emit: markdown split on line breaks, each line
    /// trimmed, empty lines discarded.
    pub fn paragraphs(&self) -> Result<Vec<String>> {
        let markdown = self.markdown()?;
        Ok(markdown
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// What the surface shows: the document, or the section placeholder
    /// when there is nothing to show.
    pub fn display(&self) -> Result<String> {
        if self.is_empty() {
            return Ok(self.section.placeholder().to_string());
        }
        self.markdown()
    }
}

fn parse_blocks(markdown: &str) -> Vec<Event<'static>> {
    Parser::new(markdown).map(Event::into_static).collect()
}
