use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::scrapers::clean::non_empty;

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("ld+json selector should parse")
});
static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("meta selector should parse"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector should parse"));

/// A fetched listing page: the raw markup and its parse tree.
pub struct Page<'a> {
    raw: &'a str,
    document: Html,
}

impl<'a> Page<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            document: Html::parse_document(raw),
        }
    }

    /// Markup exactly as served, before any parsing
    pub fn raw(&self) -> &str {
        self.raw
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Contents of every `application/ld+json` script, in document order
    pub fn json_ld_blocks(&self) -> impl Iterator<Item = String> + '_ {
        self.document.select(&LD_JSON_SELECTOR).map(|script| {
            let content = script.text().collect::<String>();
            content
                .trim()
                .trim_start_matches("<![CDATA[")
                .trim_end_matches("]]>")
                .trim()
                .to_string()
        })
    }

    /// `content` of the first `<meta property="..">` tag, e.g. `og:title`
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.meta_content("property", property)
    }

    /// `content` of the first `<meta name="..">` tag
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.meta_content("name", name)
    }

    fn meta_content(&self, attr: &str, value: &str) -> Option<String> {
        self.document
            .select(&META_SELECTOR)
            .find(|meta| meta.value().attr(attr) == Some(value))
            .and_then(|meta| meta.value().attr("content"))
            .and_then(non_empty)
    }

    /// Text of the document `<title>`
    pub fn title_text(&self) -> Option<String> {
        self.document
            .select(&TITLE_SELECTOR)
            .next()
            .and_then(|title| non_empty(&title.text().collect::<String>()))
    }
}
