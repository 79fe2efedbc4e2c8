//! # PDF Generation Module
//!
//! Renders an assembled quote to a downloadable PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is an embedded string constant
//! - Quote data is injected via string substitution before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::cutting::DoorStyle;
//! use quote_core::hardware::HardwareSelection;
//! use quote_core::opening::OpeningSpec;
//! use quote_core::pdf::render_quote_pdf;
//! use quote_core::profile::{BusinessProfile, CompanyType};
//! use quote_core::quote::assemble;
//! use quote_core::supplies::compute_supplies;
//!
//! let profile = BusinessProfile {
//!     name: "Fractal Doors Ltd".to_string(),
//!     company_type: CompanyType::DoorFabricator,
//!     address: "12 Mill Lane".to_string(),
//!     phone: "+44 1234 567890".to_string(),
//!     email: "quotes@fractaldoors.example".to_string(),
//!     website: None,
//!     social: None,
//! };
//! let opening = OpeningSpec::default();
//! let supplies = compute_supplies(
//!     opening.used_height_mm(),
//!     opening.used_width_mm(),
//!     opening.efficiency,
//!     opening.thickness,
//! );
//! let quote = assemble(
//!     profile,
//!     opening,
//!     DoorStyle::Simple,
//!     DoorStyle::Simple.preset_list(),
//!     HardwareSelection::standard(),
//!     supplies,
//! );
//! let pdf_bytes = render_quote_pdf(&quote).unwrap();
//! std::fs::write("quote.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{QuoteError, QuoteResult};
use crate::quote::Quote;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();

        // Bundled fonts from typst-assets (Libertinus, New Computer Modern, ...)
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }

        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the quote document
const QUOTE_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{BUSINESS_NAME}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

// Letterhead
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 20pt, weight: "bold")[{{BUSINESS_NAME}}]
    #v(4pt)
    #text(size: 11pt)[{{ADDRESS}}]
    #v(2pt)
    #text(size: 11pt)[{{PHONE}} | {{EMAIL}}]
    #v(2pt)
    #text(size: 10pt, fill: gray)[{{LINKS}}]
  ]
]

#v(12pt)

#text(size: 14pt, weight: "bold")[Door Quote]

#v(4pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Opening used:], [{{USED_WIDTH}} x {{USED_HEIGHT}} mm \@ {{THICKNESS}}mm],
  [Preset:], [{{PRESET}}],
  [Efficiency:], [{{EFFICIENCY}}],
  [Date:], [{{DATE}}],
)

#v(12pt)

== Cutting List

#table(
  columns: (1fr, auto, auto, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, left, right, right, right),
  table.header([*Component*], [*Material*], [*L (mm)*], [*W (mm)*], [*Qty*]),
{{CUTTING_ROWS}}
)

#v(12pt)

== Supplies & Hardware

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  table.header([*Item*], [*Qty*]),
{{SUPPLY_ROWS}}
)

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by Fractal Doors \
  Quantities are estimates based on measured opening dimensions.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render an assembled quote to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(QuoteError::Render)` - If Typst compilation or PDF export fails
pub fn render_quote_pdf(quote: &Quote) -> QuoteResult<Vec<u8>> {
    let source = QUOTE_TEMPLATE
        .replace("{{BUSINESS_NAME}}", &escape_typst(&quote.profile.name))
        .replace("{{ADDRESS}}", &escape_typst(&quote.profile.address))
        .replace("{{PHONE}}", &escape_typst(&quote.profile.phone))
        .replace("{{EMAIL}}", &escape_typst(&quote.profile.email))
        .replace("{{LINKS}}", &escape_typst(&quote.profile.links_line()))
        .replace("{{USED_WIDTH}}", &quote.used_width_mm.to_string())
        .replace("{{USED_HEIGHT}}", &quote.used_height_mm.to_string())
        .replace("{{THICKNESS}}", &quote.opening.thickness.mm().to_string())
        .replace("{{PRESET}}", quote.preset.display_name())
        .replace("{{EFFICIENCY}}", &format!("{:.0}%", quote.opening.efficiency * 100.0))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{CUTTING_ROWS}}", &build_cutting_rows(quote))
        .replace("{{SUPPLY_ROWS}}", &build_supply_rows(quote));

    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        QuoteError::render(format!(
            "Typst compilation failed: {}",
            error_msgs.join("; ")
        ))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        QuoteError::render(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })?;

    Ok(pdf_bytes)
}

/// Build cutting-list table rows
fn build_cutting_rows(quote: &Quote) -> String {
    if quote.cutting_list.is_empty() {
        return "  [--], [--], [--], [--], [--],".to_string();
    }
    quote
        .cutting_list
        .iter()
        .map(|entry| {
            format!(
                "  [{}], [{}], [{}], [{}], [{}],",
                escape_typst(&entry.name),
                entry.material.display_name(),
                entry.length_mm,
                entry.width_mm,
                entry.quantity
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build merged supplies + hardware table rows
fn build_supply_rows(quote: &Quote) -> String {
    quote
        .line_items
        .iter()
        .map(|item| {
            // Supply quantities carry decimals, hardware counts do not.
            let qty = if item.quantity.fract() == 0.0 {
                format!("{:.0}", item.quantity)
            } else {
                format!("{:.2}", item.quantity)
            };
            format!("  [{}], [{}],", escape_typst(&item.name), qty)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutting::DoorStyle;
    use crate::hardware::HardwareSelection;
    use crate::opening::OpeningSpec;
    use crate::profile::{BusinessProfile, CompanyType};
    use crate::quote::assemble;
    use crate::supplies::compute_supplies;

    fn test_quote() -> Quote {
        let profile = BusinessProfile {
            name: "Fractal Doors Ltd".to_string(),
            company_type: CompanyType::DoorFabricator,
            address: "12 Mill Lane".to_string(),
            phone: "+44 1234 567890".to_string(),
            email: "quotes@fractaldoors.example".to_string(),
            website: Some("fractaldoors.example".to_string()),
            social: None,
        };
        let opening = OpeningSpec::default();
        let supplies = compute_supplies(
            opening.used_height_mm(),
            opening.used_width_mm(),
            opening.efficiency,
            opening.thickness,
        );
        assemble(
            profile,
            opening,
            DoorStyle::Simple,
            DoorStyle::Simple.preset_list(),
            HardwareSelection::standard(),
            supplies,
        )
    }

    #[test]
    fn test_pdf_generation() {
        let quote = test_quote();
        let pdf = render_quote_pdf(&quote);

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        // PDF should start with %PDF
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        // Should be a reasonable size (at least 1KB)
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_pdf_generation_empty_custom_list() {
        let mut quote = test_quote();
        quote.preset = DoorStyle::Custom;
        quote.cutting_list.clear();

        let pdf = render_quote_pdf(&quote);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("A*B_C"), "A\\*B\\_C");
        assert_eq!(escape_typst("x@y.com"), "x\\@y.com");
        assert_eq!(escape_typst("plain"), "plain");
    }

    #[test]
    fn test_supply_rows_format_quantities() {
        let quote = test_quote();
        let rows = build_supply_rows(&quote);
        // Tape keeps its decimals, hardware counts render whole.
        assert!(rows.contains("[Edging Tape (m)], [14.12],"));
        assert!(rows.contains("[Hinges], [3],"));
    }
}
