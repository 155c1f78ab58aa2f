//! Announcement slides shown by the portal banner
//!
//! A deck is an ordered list of [`Slide`]s. Order is significant: it is the
//! order the carousel cycles through.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DeckError;

/// One announcement in the carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Short glyph shown next to the title
    #[serde(default)]
    pub icon: String,
    /// CSS-like background description, passed through to the presentation
    #[serde(default)]
    pub background: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Colour of the progress bar while this slide is shown
    pub accent_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn default_text_color() -> String {
    "#FFFFFF".to_string()
}

/// Load a deck from a JSON file containing an array of slides
pub fn load_deck(path: &Path) -> Result<Vec<Slide>, DeckError> {
    let content = std::fs::read_to_string(path).map_err(|e| DeckError::Io(e.to_string()))?;
    let slides = parse_deck(&content)?;
    info!("Loaded {} announcements from {}", slides.len(), path.display());
    Ok(slides)
}

/// Parse a deck from JSON text, rejecting duplicate ids
pub fn parse_deck(json: &str) -> Result<Vec<Slide>, DeckError> {
    let slides: Vec<Slide> =
        serde_json::from_str(json).map_err(|e| DeckError::Parse(e.to_string()))?;

    let mut seen = HashSet::with_capacity(slides.len());
    for slide in &slides {
        if !seen.insert(slide.id) {
            return Err(DeckError::DuplicateId(slide.id));
        }
    }
    debug!("Parsed deck with {} slides", slides.len());
    Ok(slides)
}

/// Built-in announcements used when no deck file is given
pub fn default_deck() -> Vec<Slide> {
    let slide = |id: u32,
                 title: &str,
                 subtitle: &str,
                 description: &str,
                 icon: &str,
                 (from, to): (&str, &str),
                 accent: &str,
                 image: &str| Slide {
        id,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        background: format!("linear-gradient(135deg, {} 0%, {} 100%)", from, to),
        text_color: default_text_color(),
        accent_color: accent.to_string(),
        image: Some(format!(
            "https://images.unsplash.com/{}?w=800&h=400&fit=crop&crop=center",
            image
        )),
    };

    vec![
        slide(
            1,
            "Digital India Initiative",
            "Transforming City through Technology",
            "Report civic issues instantly through our AI-powered grievance portal. Get faster resolutions with real-time tracking.",
            "🇮🇳",
            ("#1F4E78", "#153456"),
            "#F77F00",
            "photo-1577962917302-cd874c4e31d2",
        ),
        slide(
            2,
            "Swachh Bharat Mission",
            "Clean City, Green City",
            "Join our cleanliness drive. Report garbage issues and help maintain hygiene standards for a healthier tomorrow.",
            "🌱",
            ("#2E7D32", "#1B5E20"),
            "#4CAF50",
            "photo-1558618666-fcd25c85cd64",
        ),
        slide(
            3,
            "Smart City Mission",
            "Building Tomorrow Today",
            "Advanced infrastructure monitoring with IoT sensors. Real-time issue detection and automated municipal responses.",
            "🏙️",
            ("#1565C0", "#0D47A1"),
            "#2196F3",
            "photo-1480714378408-67cf0d13bc1f",
        ),
        slide(
            4,
            "Citizen First Initiative",
            "Your Voice, Our Priority",
            "24/7 grievance redressal system. Track your complaints in real-time and get updates directly on your mobile.",
            "👥",
            ("#F57C00", "#E65100"),
            "#FF9800",
            "photo-1521737604893-d14cc237f11d",
        ),
        slide(
            5,
            "Emergency Response System",
            "Rapid Action for Critical Issues",
            "AI-powered priority detection for emergency situations. Critical issues get immediate attention from our response teams.",
            "🚨",
            ("#D32F2F", "#B71C1C"),
            "#F44336",
            "photo-1551601651-2a8555f1a136",
        ),
    ]
}
