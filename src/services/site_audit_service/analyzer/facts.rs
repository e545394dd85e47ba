use scraper::{ElementRef, Html, Selector};

/// Everything the rules look at, pulled out of one page and its root resources.
///
/// The markup is parsed and dropped inside [`PageFacts::from_html`], so the facts can be
/// held across awaits and handed to rules as plain data.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageFacts {
    pub https: bool,
    pub title: String,
    pub meta_description: String,
    pub canonical: String,
    pub viewport: String,
    pub h1_count: usize,
    pub h2_count: usize,
    pub img_missing_alt: usize,
    pub img_not_lazy: usize,
    pub jsonld_count: usize,
    pub robots_found: bool,
    pub sitemap_found: bool,
}

impl PageFacts {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = select_all(&document, "title")
            .iter()
            .flat_map(|el| el.text())
            .collect::<String>()
            .trim()
            .to_string();

        let images = select_all(&document, "img");
        let img_missing_alt = images
            .iter()
            .filter(|img| img.value().attr("alt").map_or(true, |alt| alt.trim().is_empty()))
            .count();
        let img_not_lazy = images
            .iter()
            .filter(|img| {
                !img.value()
                    .attr("loading")
                    .map_or(false, |loading| loading.eq_ignore_ascii_case("lazy"))
            })
            .count();

        PageFacts {
            title,
            meta_description: first_attr(&document, r#"meta[name="description"]"#, "content"),
            canonical: first_attr(&document, r#"link[rel="canonical"]"#, "href"),
            viewport: first_attr(&document, r#"meta[name="viewport"]"#, "content"),
            h1_count: select_all(&document, "h1").len(),
            h2_count: select_all(&document, "h2").len(),
            img_missing_alt,
            img_not_lazy,
            jsonld_count: select_all(&document, r#"script[type="application/ld+json"]"#).len(),
            ..PageFacts::default()
        }
    }
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            log::warn!("Invalid selector {}: {:?}", css, e);
            Vec::new()
        }
    }
}

// Trimmed attribute of the first matching element, empty when absent
fn first_attr(document: &Html, css: &str, attr: &str) -> String {
    select_all(document, css)
        .first()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title> Widgets &amp; Co </title>
    <meta name="description" content="  Hand made widgets ">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="canonical" href="https://example.com/">
    <script type="application/ld+json">{"@type": "Organization"}</script>
</head>
<body>
    <h1>Widgets</h1>
    <h2>Catalog</h2>
    <h2>Contact</h2>
    <img src="a.png" alt="A widget" loading="LAZY">
    <img src="b.png" alt="  ">
    <img src="c.png" loading="eager">
</body>
</html>"#;

    #[test]
    fn extracts_document_facts() {
        let facts = PageFacts::from_html(PAGE);

        assert_eq!(facts.title, "Widgets & Co");
        assert_eq!(facts.meta_description, "Hand made widgets");
        assert_eq!(facts.canonical, "https://example.com/");
        assert!(facts.viewport.contains("width=device-width"));
        assert_eq!(facts.h1_count, 1);
        assert_eq!(facts.h2_count, 2);
        assert_eq!(facts.img_missing_alt, 2);
        assert_eq!(facts.img_not_lazy, 2);
        assert_eq!(facts.jsonld_count, 1);
    }

    #[test]
    fn empty_document_has_no_facts() {
        let facts = PageFacts::from_html("");

        assert_eq!(facts, PageFacts::default());
    }
}
