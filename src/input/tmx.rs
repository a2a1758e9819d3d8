//! Translation-memory (TMX) document reader.
//!
//! Only the parts of the format needed to build a dictionary are read:
//!
//! ```xml
//! <tmx version="1.4">
//!   <header srclang="en" ... />
//!   <body>
//!     <tu tuid="Welcome">
//!       <tuv xml:lang="es"><seg>Bienvenido</seg></tuv>
//!     </tu>
//!   </body>
//! </tmx>
//! ```

use roxmltree::{
    Document,
    Node,
    ParsingOptions,
};

use super::SourceError;
use super::translation::TranslationUnit;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Units and language tags read from a translation-memory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMemory {
    pub units: Vec<TranslationUnit>,
    /// Every distinct language tag, in order of first appearance.
    pub languages: Vec<String>,
}

/// Parses a TMX document.
///
/// `primary_locale` is used to pick a unit identifier for `<tu>` elements
/// without a `tuid`: the primary-locale segment, else the first segment.
/// Units with neither are skipped.
pub fn parse_tmx(text: &str, primary_locale: &str) -> Result<TranslationMemory, SourceError> {
    // TMX files usually carry a DOCTYPE pointing at the DTD.
    let options = ParsingOptions { allow_dtd: true, ..ParsingOptions::default() };
    let document = Document::parse_with_options(text, options)?;

    let root = document.root_element();
    if !root.has_tag_name("tmx") {
        return Err(SourceError::UnexpectedElement {
            expected: "tmx",
            found: root.tag_name().name().to_string(),
        });
    }

    let body = root.children().find(|n| n.has_tag_name("body")).ok_or(SourceError::MissingBody)?;

    let mut memory = TranslationMemory::default();
    for tu in body.children().filter(|n| n.has_tag_name("tu")) {
        let variants = read_variants(tu);

        for (language, _) in &variants {
            if !memory.languages.contains(language) {
                memory.languages.push(language.clone());
            }
        }

        let Some(id) = unit_id(tu, &variants, primary_locale) else {
            tracing::debug!(
                line = document.text_pos_at(tu.range().start).row,
                "Skipping <tu> without tuid or segments"
            );
            continue;
        };

        let mut unit = TranslationUnit::new(id);
        unit.variants.extend(variants);
        memory.units.push(unit);
    }

    Ok(memory)
}

/// Reads `(language, segment text)` pairs from the `<tuv>` children of a unit.
fn read_variants(tu: Node<'_, '_>) -> Vec<(String, String)> {
    tu.children()
        .filter(|n| n.has_tag_name("tuv"))
        .filter_map(|tuv| {
            let language = language_tag(tuv)?;
            let segment = tuv.children().find(|n| n.has_tag_name("seg"))?;
            Some((language, segment_text(segment)))
        })
        .collect()
}

/// `xml:lang` in TMX 1.4, plain `lang` in TMX 1.1.
fn language_tag(tuv: Node<'_, '_>) -> Option<String> {
    tuv.attribute((XML_NAMESPACE, "lang"))
        .or_else(|| tuv.attribute("lang"))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
}

/// Flattens a `<seg>` (including inline markup such as `<bpt>`/`<ph>`) to text.
fn segment_text(segment: Node<'_, '_>) -> String {
    segment.descendants().filter(Node::is_text).filter_map(|n| n.text()).collect()
}

fn unit_id(tu: Node<'_, '_>, variants: &[(String, String)], primary_locale: &str) -> Option<String> {
    if let Some(tuid) = tu.attribute("tuid").filter(|id| !id.trim().is_empty()) {
        return Some(tuid.to_string());
    }

    variants
        .iter()
        .find(|(language, _)| language == primary_locale)
        .or_else(|| variants.first())
        .map(|(_, text)| text.clone())
        .filter(|text| !text.is_empty())
}
