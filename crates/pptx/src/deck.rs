//! The slide sequence of a generated deck.

use slidegen_core::CaptionSet;

/// One slide of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    /// Opening slide carrying the deck title.
    Title { text: String },

    /// Background image with a centered caption. `name` is the caption's
    /// slide label and is stored as the slide name, not as visible text.
    Caption { name: String, text: String },

    /// Closing slide with a solid black background and no text.
    Closing,
}

impl Slide {
    /// Whether the slide references the shared background image.
    pub fn uses_background_image(&self) -> bool {
        matches!(self, Slide::Caption { .. })
    }
}

/// Lay out a deck: title, one slide per caption in order, then the black
/// closing slide. Always `captions.len() + 2` slides.
pub fn plan_slides(title: &str, captions: &CaptionSet) -> Vec<Slide> {
    let mut slides = Vec::with_capacity(captions.len() + 2);
    slides.push(Slide::Title {
        text: title.to_string(),
    });
    slides.extend(captions.iter().map(|entry| Slide::Caption {
        name: entry.slide_id.clone(),
        text: entry.text.clone(),
    }));
    slides.push(Slide::Closing);
    slides
}
