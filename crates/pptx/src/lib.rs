//! PPTX (Office Open XML) backend for text-to-slideshow conversion.
//!
//! Writes widescreen decks as ZIP archives of XML parts, and reads them back
//! into summaries.

pub mod background;
pub mod deck;
pub mod layout;
pub mod parts;
pub mod pipeline;
pub mod reader;
pub mod render;
mod xml;

pub use background::BackgroundImage;
pub use deck::{plan_slides, Slide};
pub use pipeline::{convert, Conversion};
pub use reader::{DeckReader, DeckSummary, ShapeText, SlideSummary};
pub use render::SlideshowRenderer;
