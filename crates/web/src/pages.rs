//! The upload form page.

use crate::flash::Flash;
use axum::response::Html;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Text to Slideshow</title>
<style>
body { font-family: sans-serif; max-width: 40em; margin: 3em auto; }
label { display: block; margin-top: 1em; }
.flash { padding: 0.5em 1em; border-radius: 4px; }
.flash.success { background: #e3f6e5; color: #1d5b26; }
.flash.error { background: #fbe4e4; color: #8a1f1f; }
</style>
</head>
<body>
<h1>Text to Slideshow</h1>
"#;

const FORM: &str = r#"<form method="post" action="/" enctype="multipart/form-data">
<label>Text file (one slide per line)
<input type="file" name="file" accept=".txt"></label>
<label>Background image
<input type="file" name="image" accept=".png,.jpg,.jpeg"></label>
<label>Text color
<select name="color">
<option value="white">White</option>
<option value="black">Black</option>
</select></label>
<p><button type="submit">Create presentation</button></p>
</form>
</body>
</html>
"#;

/// Render the form with any pending notices above it.
pub fn render_index(flashes: &[Flash]) -> Html<String> {
    let mut page = String::from(HEAD);
    for flash in flashes {
        page.push_str(&format!(
            "<p class=\"flash {}\">{}</p>\n",
            flash.category.as_str(),
            html_escape::encode_text(&flash.message)
        ));
    }
    page.push_str(FORM);
    Html(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields() {
        let Html(page) = render_index(&[]);
        assert!(page.contains(r#"enctype="multipart/form-data""#));
        assert!(page.contains(r#"name="file""#));
        assert!(page.contains(r#"name="image""#));
        assert!(page.contains(r#"<select name="color">"#));
        assert!(!page.contains("class=\"flash"));
    }

    #[test]
    fn test_flashes_are_escaped() {
        let Html(page) = render_index(&[
            Flash::success("Presentation created successfully!"),
            Flash::error("<script>alert(1)</script>"),
        ]);
        assert!(page.contains(
            "<p class=\"flash success\">Presentation created successfully!</p>"
        ));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
