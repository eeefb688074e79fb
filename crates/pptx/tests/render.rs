//! End-to-end tests: text file in, PPTX out, read back with the deck reader.

use image::{ImageFormat, Rgb, RgbImage};
use slidegen_core::{RenderConfig, TextColor};
use slidegen_pptx::layout::{SLIDE_HEIGHT, SLIDE_WIDTH};
use slidegen_pptx::{convert, DeckReader, DeckSummary};
use std::fs::File;
use std::path::{Path, PathBuf};

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(16, 9, Rgb([10, 60, 120]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn read_deck(path: &Path) -> DeckSummary {
    DeckReader::new().read(File::open(path).unwrap()).unwrap()
}

#[test]
fn test_revenue_example() {
    let dir = tempfile::tempdir().unwrap();
    let text = write_text(dir.path(), "figures.txt", "Revenue: $5M\n\nGrowth: 12%\n");
    let image = write_png(dir.path(), "bg.png");

    let conversion = convert(&text, &RenderConfig::new(image, TextColor::resolve("white"))).unwrap();
    assert_eq!(conversion.json_path, dir.path().join("figures.json"));
    assert_eq!(conversion.pptx_path, dir.path().join("figures.pptx"));
    assert_eq!(conversion.slide_count(), 4);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&conversion.json_path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"Slide 1": "Revenue: $5M", "Slide 3": "Growth: 12%"})
    );

    let deck = read_deck(&conversion.pptx_path);
    assert_eq!((deck.slide_width, deck.slide_height), (SLIDE_WIDTH, SLIDE_HEIGHT));
    assert_eq!(deck.slides.len(), 4);

    let title = &deck.slides[0];
    assert_eq!(title.texts.len(), 1);
    assert_eq!(title.texts[0].text, "figures");
    assert!(!title.has_picture);
    assert_eq!(title.background, None);

    let expected = [("Slide 1", "Revenue: $5M"), ("Slide 3", "Growth: 12%")];
    for (slide, (label, caption)) in deck.slides[1..3].iter().zip(expected) {
        assert_eq!(slide.name.as_deref(), Some(label));
        assert!(slide.has_picture);
        assert_eq!(slide.texts.len(), 1);
        assert_eq!(slide.texts[0].text, caption);
        assert_eq!(slide.texts[0].color.as_deref(), Some("FFFFFF"));
        assert!(slide.texts[0].centered);
    }

    let closing = &deck.slides[3];
    assert_eq!(closing.background.as_deref(), Some("000000"));
    assert!(closing.texts.is_empty());
    assert!(!closing.has_picture);
}

#[test]
fn test_slide_count_is_captions_plus_two() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "bg.png");

    for (name, content, captions) in [
        ("empty.txt", "", 0),
        ("blank.txt", "\n  \n\t\n", 0),
        ("one.txt", "only line", 1),
        ("gappy.txt", "a\n\n\nb\nc\n\n", 3),
    ] {
        let text = write_text(dir.path(), name, content);
        let config = RenderConfig::new(&image, TextColor::Black);
        let conversion = convert(&text, &config).unwrap();
        assert_eq!(conversion.caption_count, captions, "{}", name);

        let deck = read_deck(&conversion.pptx_path);
        assert_eq!(deck.slides.len(), captions + 2, "{}", name);
    }
}

#[test]
fn test_unrecognized_color_renders_black() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "bg.png");
    let text = write_text(dir.path(), "notes.txt", "1 + 5\n");

    for choice in ["black", "", "purple", "whitee"] {
        let conversion = convert(&text, &RenderConfig::new(&image, TextColor::resolve(choice))).unwrap();
        let deck = read_deck(&conversion.pptx_path);
        assert_eq!(deck.slides[1].texts[0].color.as_deref(), Some("000000"), "{:?}", choice);
    }
}

#[test]
fn test_regeneration_replaces_output() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "bg.png");
    let text = write_text(dir.path(), "talk.txt", "first\nsecond\nthird\n");
    let config = RenderConfig::new(&image, TextColor::White);

    let first = convert(&text, &config).unwrap();
    let first_bytes = std::fs::read(&first.pptx_path).unwrap();
    let second = convert(&text, &config).unwrap();
    let second_bytes = std::fs::read(&second.pptx_path).unwrap();

    assert_eq!(first.pptx_path, second.pptx_path);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(read_deck(&second.pptx_path).slides.len(), 5);

    // Shrinking the input shrinks the deck rather than appending to it.
    write_text(dir.path(), "talk.txt", "only\n");
    let third = convert(&text, &config).unwrap();
    assert_eq!(read_deck(&third.pptx_path).slides.len(), 3);
}

#[test]
fn test_jpeg_background() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("bg.jpg");
    RgbImage::from_pixel(32, 18, Rgb([200, 200, 200]))
        .save_with_format(&image, ImageFormat::Jpeg)
        .unwrap();
    let text = write_text(dir.path(), "photo.txt", "Caption <one> & \"two\"\n");

    let conversion = convert(&text, &RenderConfig::new(image, TextColor::Black)).unwrap();
    let deck = read_deck(&conversion.pptx_path);
    assert_eq!(deck.slides[1].texts[0].text, "Caption <one> & \"two\"");
}

#[test]
fn test_corrupt_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_text(dir.path(), "bg.png", "not really a png");
    let text = write_text(dir.path(), "notes.txt", "line\n");

    let err = convert(&text, &RenderConfig::new(image, TextColor::White)).unwrap_err();
    assert!(matches!(err, slidegen_core::Error::Image(_)));
    assert!(!dir.path().join("notes.pptx").exists());
}
