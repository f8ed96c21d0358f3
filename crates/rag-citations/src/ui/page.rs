//! Server-rendered page: title, upload form and output area

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::config::UiConfig;
use crate::types::response::{AnswerView, Outcome};

use super::form::{FILES_FIELD, QUERY_FIELD};

/// One item in the output area, in display order
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Plain line of text
    Text(String),
    /// Markdown rendered to HTML (raw HTML in the source is shown as text)
    Markdown(String),
    /// Error message
    Error(String),
}

/// The single page of the application
#[derive(Debug, Clone)]
pub struct Page<'a> {
    ui: &'a UiConfig,
    credential_error: Option<String>,
    query: String,
    blocks: Vec<Block>,
}

impl<'a> Page<'a> {
    pub fn new(ui: &'a UiConfig) -> Self {
        Self {
            ui,
            credential_error: None,
            query: String::new(),
            blocks: Vec::new(),
        }
    }

    /// Show the missing-credential banner above the form
    pub fn with_credential_error(mut self, message: Option<String>) -> Self {
        self.credential_error = message;
        self
    }

    /// Pre-fill the query box
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Append the output of one submit
    pub fn with_outcome(mut self, outcome: &Outcome) -> Self {
        match outcome {
            Outcome::NeedsInput(message) => self.blocks.push(Block::Text(message.clone())),
            Outcome::Answered(view) => self.blocks.extend(answer_blocks(view)),
        }
        self
    }

    /// Append an error block
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.blocks.push(Block::Error(message.into()));
        self
    }

    /// Output blocks in display order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Render the full HTML document
    pub fn render(&self) -> String {
        let title = escape_html(&self.ui.title);
        let mut out = String::with_capacity(4096);

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", title));
        out.push_str(STYLE);
        out.push_str("</head>\n<body>\n<main>\n");
        out.push_str(&format!("<h1>{}</h1>\n", title));

        if let Some(message) = &self.credential_error {
            out.push_str(&format!(
                "<div class=\"error\" role=\"alert\">{}</div>\n",
                escape_html(message)
            ));
        }

        out.push_str("<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n");
        out.push_str(&format!(
            "<label for=\"{files}\">Upload documents related to your query (text files):</label>\n\
             <input type=\"file\" id=\"{files}\" name=\"{files}\" accept=\"{accept}\" multiple>\n",
            files = FILES_FIELD,
            accept = escape_html(&self.ui.accept_attribute()),
        ));
        out.push_str(&format!(
            "<label for=\"{query}\">Enter your query:</label>\n\
             <textarea id=\"{query}\" name=\"{query}\" rows=\"4\">{value}</textarea>\n",
            query = QUERY_FIELD,
            value = escape_html(&self.query),
        ));
        out.push_str("<button type=\"submit\">Get Answer</button>\n</form>\n");

        if !self.blocks.is_empty() {
            out.push_str("<section class=\"output\">\n");
            for block in &self.blocks {
                out.push_str(&render_block(block));
            }
            out.push_str("</section>\n");
        }

        out.push_str("</main>\n</body>\n</html>\n");
        out
    }
}

/// Blocks for an answer: the answer itself, then one line per resolved citation
pub fn answer_blocks(view: &AnswerView) -> Vec<Block> {
    let mut blocks = vec![
        Block::Text("Answer:".to_string()),
        Block::Markdown(view.answer.clone()),
    ];

    if !view.citations.is_empty() {
        blocks.push(Block::Text("Citations:".to_string()));
        blocks.extend(view.citation_lines().into_iter().map(Block::Markdown));
    }

    blocks
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Text(text) => format!("<p>{}</p>\n", escape_html(text)),
        Block::Markdown(source) => format!("<div class=\"md\">{}</div>\n", render_markdown(source)),
        Block::Error(message) => {
            format!("<div class=\"error\" role=\"alert\">{}</div>\n", escape_html(message))
        }
    }
}

/// Render Markdown to HTML, treating embedded raw HTML as literal text.
/// Link and image destinations with a scheme other than http, https or mailto
/// are emptied; relative destinations are kept.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&dest) {
        dest
    } else {
        CowStr::Borrowed("")
    }
}

/// Whether a link destination is relative or uses an allowed scheme
fn is_safe_destination(dest: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    let scheme_end = match cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(pos) if cleaned[pos..].starts_with(':') => pos,
        _ => return true,
    };

    let scheme = cleaned[..scheme_end].to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https" | "mailto")
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = "<style>\n\
body{font-family:system-ui,sans-serif;margin:0;background:#fafafa;color:#222}\n\
main{max-width:46rem;margin:2rem auto;padding:0 1rem}\n\
form{display:flex;flex-direction:column;gap:.5rem;margin-bottom:1.5rem}\n\
textarea{font:inherit;padding:.5rem}\n\
button{align-self:flex-start;padding:.4rem 1rem;font:inherit;cursor:pointer}\n\
.error{background:#fdecea;color:#8a1c12;padding:.75rem 1rem;border-radius:.25rem;margin-bottom:1rem}\n\
.output p{margin:.5rem 0}\n\
</style>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::response::ResolvedCitation;

    fn view(citations: Vec<ResolvedCitation>) -> AnswerView {
        AnswerView::new("Grass is **green**.".to_string(), citations, "command-r", 2, 5)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_markdown_neutralises_raw_html() {
        let rendered = render_markdown("Hello <script>alert(1)</script> **world**");
        assert!(rendered.contains("<strong>world</strong>"));
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_markdown_drops_script_destinations() {
        let rendered = render_markdown(
            "See [source](javascript:alert(document.cookie)) and ![x](javascript:alert(2))",
        );
        assert!(!rendered.contains("javascript:"));
        assert!(rendered.contains(">source</a>"));
        assert!(rendered.contains("alt=\"x\""));

        let rendered = render_markdown("[a](JaVaScript:alert(1)) [b](data:text/html,hi) [c](vbscript:x)");
        assert!(!rendered.to_lowercase().contains("script:"));
        assert!(!rendered.contains("data:"));
    }

    #[test]
    fn test_markdown_keeps_safe_destinations() {
        let rendered = render_markdown(
            "[web](https://example.com/a?b=c) [mail](mailto:a@example.com) [rel](docs/page.html#x:y) [frag](#top)",
        );
        assert!(rendered.contains("href=\"https://example.com/a?b=c\""));
        assert!(rendered.contains("href=\"mailto:a@example.com\""));
        assert!(rendered.contains("href=\"docs/page.html#x:y\""));
        assert!(rendered.contains("href=\"#top\""));
    }

    #[test]
    fn test_answer_blocks_without_citations() {
        let blocks = answer_blocks(&view(Vec::new()));
        assert_eq!(
            blocks,
            vec![
                Block::Text("Answer:".to_string()),
                Block::Markdown("Grass is **green**.".to_string()),
            ]
        );
    }

    #[test]
    fn test_answer_blocks_with_citation() {
        let blocks = answer_blocks(&view(vec![ResolvedCitation {
            text: "green".to_string(),
            document_id: "doc_1".to_string(),
            document_index: 1,
            filename: "grass.txt".to_string(),
            source: "Grass is green.".to_string(),
        }]));

        assert_eq!(blocks[2], Block::Text("Citations:".to_string()));
        assert_eq!(
            blocks[3],
            Block::Markdown("- green (from document: Grass is green.)".to_string())
        );
    }

    #[test]
    fn test_render_form_and_banner() {
        let ui = UiConfig::default();
        let html = Page::new(&ui)
            .with_credential_error(Some("COHERE_API_KEY environment variable not found. Please set it.".to_string()))
            .with_query("a < b")
            .render();

        assert!(html.contains("<h1>RAG with Citations - Command-r</h1>"));
        assert!(html.contains("COHERE_API_KEY environment variable not found. Please set it."));
        assert!(html.contains("name=\"files\""));
        assert!(html.contains("accept=\".txt\""));
        assert!(html.contains(">a &lt; b</textarea>"));
        assert!(html.contains("Get Answer"));
        assert!(!html.contains("class=\"output\""));
    }

    #[test]
    fn test_render_needs_input() {
        let ui = UiConfig::default();
        let html = Page::new(&ui)
            .with_outcome(&Outcome::NeedsInput("Please enter a query to proceed.".to_string()))
            .render();

        assert!(html.contains("<p>Please enter a query to proceed.</p>"));
    }
}
