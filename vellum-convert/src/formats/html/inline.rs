//! Inline style resolution.
//!
//! `derive_style` is a pure function of (tag, class, style attribute,
//! inherited flags). A child starts from the parent's resolved flags and may
//! add or override, never subtract; the superscript/subscript pair is the
//! one exception and is enforced by the flag setters themselves.
//!
//! CSS handling is deliberately restricted to four declarations —
//! font-weight, font-style, text-decoration and color. Everything else in a
//! style attribute is ignored.

use vellum_model::StyleFlags;

/// Word's default hyperlink color.
pub const LINK_COLOR: &str = "0563C1";

/// The monospace font used for code-like tags.
pub const MONOSPACE_FONT: &str = "Courier New";

/// Muted gray used by the subtle character styles.
const SUBTLE_COLOR: &str = "595959";

/// Resolve the style flags for an element given its tag, class attribute,
/// style attribute and the flags inherited from its parent.
pub fn derive_style(
    tag: &str,
    class_attr: Option<&str>,
    style_attr: Option<&str>,
    inherited: &StyleFlags,
) -> StyleFlags {
    let mut flags = inherited.clone();

    match tag {
        "strong" | "b" => flags.bold = true,
        "em" | "i" => flags.italics = true,
        "u" | "ins" => flags.underline = true,
        "del" | "s" | "strike" => flags.strike = true,
        "code" | "pre" | "kbd" | "samp" => flags.font = Some(MONOSPACE_FONT.to_string()),
        "sup" => flags.set_super_script(),
        "sub" => flags.set_sub_script(),
        "a" => {
            flags.underline = true;
            flags.color = Some(LINK_COLOR.to_string());
        }
        _ => {}
    }

    if let Some(classes) = class_attr {
        for class in classes.split_whitespace() {
            match class {
                "book-title" => {
                    flags.bold = true;
                    flags.italics = true;
                }
                "subtle-emphasis" => {
                    flags.italics = true;
                    flags.color = Some(SUBTLE_COLOR.to_string());
                }
                "subtle-reference" => {
                    flags.color = Some(SUBTLE_COLOR.to_string());
                }
                _ => {}
            }
        }
    }

    if let Some(style) = style_attr {
        apply_css_declarations(style, &mut flags);
    }

    flags
}

/// Apply the restricted CSS declaration set from a style attribute.
fn apply_css_declarations(style: &str, flags: &mut StyleFlags) {
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        let lowered = value.to_ascii_lowercase();

        match property.as_str() {
            "font-weight" => {
                if lowered.contains("bold") || numeric_weight_is_bold(&lowered) {
                    flags.bold = true;
                }
            }
            "font-style" => {
                if lowered.contains("italic") {
                    flags.italics = true;
                }
            }
            "text-decoration" | "text-decoration-line" => {
                // One declaration can raise both flags: "underline line-through".
                if lowered.contains("underline") {
                    flags.underline = true;
                }
                if lowered.contains("line-through") {
                    flags.strike = true;
                }
            }
            "color" => {
                if let Some(hex) = parse_css_color(&lowered) {
                    flags.color = Some(hex);
                }
            }
            _ => {}
        }
    }
}

fn numeric_weight_is_bold(value: &str) -> bool {
    value.trim().parse::<u32>().map_or(false, |w| w >= 600)
}

/// Parse a CSS color into 6-digit uppercase hex (no `#`).
///
/// Accepts `#rgb`, `#rrggbb` and `rgb()`/`rgba()` triplets; every other
/// notation (named colors, hsl, …) is ignored.
pub fn parse_css_color(value: &str) -> Option<String> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return match hex.len() {
            3 if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                Some(expanded.to_ascii_uppercase())
            }
            6 if hex.chars().all(|c| c.is_ascii_hexdigit()) => Some(hex.to_ascii_uppercase()),
            _ => None,
        };
    }

    if let Some(rest) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        let inner = rest.strip_suffix(')')?;
        let mut channels = inner.split(',').map(str::trim);
        let r = channels.next()?.parse::<u32>().ok()?.min(255);
        let g = channels.next()?.parse::<u32>().ok()?.min(255);
        let b = channels.next()?.parse::<u32>().ok()?.min(255);
        return Some(format!("{r:02X}{g:02X}{b:02X}"));
    }

    None
}
