//! Turn the reply text of a text-generation service into a structured
//! document of headings, tables, lists and paragraphs with emphasis spans.
//!
//! Parsing is a pure function of the text and never fails; anything it does
//! not recognize becomes a plain paragraph. Rendering to Typst and PDF sits
//! on top of the parsed [`Document`].

mod block;
mod config;
mod error;
mod inline;
mod lines;
mod markup;
mod parser;
mod typst;

pub use block::{Block, Document, HeadingLevel, InlineSpan};
pub use config::{Config, FontConfig, LayoutConfig, PageConfig};
pub use error::{ConfigError, RenderError};
pub use inline::format;
pub use markup::to_markup;
pub use parser::segment;
pub use typst::document_to_typst;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse reply text into a document.
pub fn parse(text: &str) -> Document {
    parser::segment(text)
}

/// Convert reply text to Typst markup using default config.
pub fn reply_to_typst(text: &str) -> String {
    reply_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert reply text to Typst markup with custom config.
pub fn reply_to_typst_with_config(text: &str, config: &Config) -> String {
    let doc = parse(text);
    typst::document_to_typst(&doc, config)
}

/// Convert reply text to PDF bytes using default config.
pub fn reply_to_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    reply_to_pdf_with_config(text, &Config::compiled_default())
}

/// Convert reply text to PDF bytes with custom config.
pub fn reply_to_pdf_with_config(text: &str, config: &Config) -> Result<Vec<u8>, RenderError> {
    use typst_library::layout::PagedDocument;

    let typst_content = reply_to_typst_with_config(text, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(config.font.system);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| RenderError::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| RenderError::Export(format!("{:?}", e)))
}
