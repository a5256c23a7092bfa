//! Image resolution for the HTML → block conversion.
//!
//! Every failure path here returns `None`: a single bad image must never
//! cost the rest of the document, so callers drop unresolvable images and
//! keep converting.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::GenericImageView;
use url::Url;
use vellum_model::{Alignment, ImageBlock, ImageFormat};

/// Display bound in pixels. Dimensions are clamped to fit, preserving the
/// aspect ratio; images are never upscaled past their resolved size.
pub const MAX_WIDTH: u32 = 480;
pub const MAX_HEIGHT: u32 = 600;

/// Everything the resolver needs from an `<img>` element and its context.
#[derive(Debug, Default)]
pub struct ImageRequest<'a> {
    pub src: &'a str,
    pub style: Option<&'a str>,
    pub width_attr: Option<&'a str>,
    pub height_attr: Option<&'a str>,
    /// Alignment inherited from the nearest aligned ancestor.
    pub ancestor_alignment: Option<Alignment>,
}

/// Resolve an image source into bytes, format, bounded dimensions and
/// alignment. `None` means the image is silently omitted.
pub fn resolve(request: &ImageRequest) -> Option<ImageBlock> {
    let (mut bytes, declared_mime) = load_bytes(request.src)?;

    // WebP is not accepted by the destination container; re-encode to PNG.
    let mut format = if is_webp(&bytes, declared_mime.as_deref(), request.src) {
        bytes = reencode_png(&bytes)?;
        ImageFormat::Png
    } else {
        detect_format(&bytes, declared_mime.as_deref(), request.src)
    };

    // Signature bytes win over any conflicting claim.
    if let Some(sniffed) = sniff_format(&bytes) {
        format = sniffed;
    }

    let natural = image::load_from_memory(&bytes)
        .ok()
        .map(|img| img.dimensions());
    let (width, height) = resolve_dimensions(request, natural);

    let alignment = resolve_alignment(request);

    Some(ImageBlock {
        bytes,
        width,
        height,
        format,
        alignment,
    })
}

/// Load raw bytes from a data URI or a local file reference. Remote http(s)
/// sources are not fetched; they resolve to `None` like any other failure.
fn load_bytes(src: &str) -> Option<(Vec<u8>, Option<String>)> {
    if let Some(rest) = src.strip_prefix("data:") {
        let (header, payload) = rest.split_once(',')?;
        if !header.ends_with(";base64") {
            return None;
        }
        let mime = header.trim_end_matches(";base64").to_string();
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64.decode(cleaned.as_bytes()).ok()?;
        return Some((bytes, Some(mime)));
    }

    match Url::parse(src) {
        Ok(url) if url.scheme() == "file" => {
            let path = url.to_file_path().ok()?;
            std::fs::read(path).ok().map(|b| (b, None))
        }
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => None,
        // Anything unparseable as a URL is treated as a relative path.
        _ => std::fs::read(src).ok().map(|b| (b, None)),
    }
}

fn is_webp(bytes: &[u8], mime: Option<&str>, src: &str) -> bool {
    if mime.is_some_and(|m| m.contains("webp")) {
        return true;
    }
    if extension_of(src).is_some_and(|ext| ext.eq_ignore_ascii_case("webp")) {
        return true;
    }
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
}

fn reencode_png(bytes: &[u8]) -> Option<Vec<u8>> {
    let img = image::load_from_memory(bytes).ok()?;
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .ok()?;
    Some(out)
}

/// Declared MIME type, then URL extension, then magic bytes, then PNG.
fn detect_format(bytes: &[u8], mime: Option<&str>, src: &str) -> ImageFormat {
    if let Some(format) = mime.and_then(format_from_mime) {
        return format;
    }
    if let Some(format) = extension_of(src).and_then(format_from_extension) {
        return format;
    }
    sniff_format(bytes).unwrap_or(ImageFormat::Png)
}

fn format_from_mime(mime: &str) -> Option<ImageFormat> {
    let mime = mime.to_ascii_lowercase();
    if mime.contains("png") {
        Some(ImageFormat::Png)
    } else if mime.contains("jpeg") || mime.contains("jpg") {
        Some(ImageFormat::Jpeg)
    } else if mime.contains("gif") {
        Some(ImageFormat::Gif)
    } else if mime.contains("bmp") {
        Some(ImageFormat::Bmp)
    } else {
        None
    }
}

fn format_from_extension(ext: &str) -> Option<ImageFormat> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "gif" => Some(ImageFormat::Gif),
        "bmp" => Some(ImageFormat::Bmp),
        _ => None,
    }
}

/// True image type from signature bytes, independent of any claimed type.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some(ImageFormat::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        Some(ImageFormat::Jpeg)
    } else if bytes.starts_with(&[0x47, 0x49, 0x46]) {
        Some(ImageFormat::Gif)
    } else if bytes.starts_with(&[0x42, 0x4D]) {
        Some(ImageFormat::Bmp)
    } else {
        None
    }
}

fn extension_of(src: &str) -> Option<&str> {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    let (_, ext) = path.rsplit_once('.')?;
    (!ext.contains('/')).then_some(ext)
}

/// Target dimensions with priority: inline style pixels → width/height
/// attributes → natural dimensions → the bounded maximum. Aspect ratio is
/// always preserved and the result never exceeds the bound.
fn resolve_dimensions(request: &ImageRequest, natural: Option<(u32, u32)>) -> (u32, u32) {
    let style_w = request.style.and_then(|s| style_pixel_value(s, "width"));
    let style_h = request.style.and_then(|s| style_pixel_value(s, "height"));

    let attr_w = request.width_attr.and_then(parse_dimension);
    let attr_h = request.height_attr.and_then(parse_dimension);

    let requested_w = style_w.or(attr_w);
    let requested_h = style_h.or(attr_h);

    let (nat_w, nat_h) = natural.unwrap_or((MAX_WIDTH, MAX_HEIGHT));
    let ratio = nat_h as f64 / nat_w.max(1) as f64;

    let (width, height) = match (requested_w, requested_h) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, ((w as f64) * ratio).round() as u32),
        (None, Some(h)) => (((h as f64) / ratio.max(f64::MIN_POSITIVE)).round() as u32, h),
        (None, None) => (nat_w, nat_h),
    };

    clamp_to_bound(width.max(1), height.max(1))
}

fn clamp_to_bound(width: u32, height: u32) -> (u32, u32) {
    let scale_w = MAX_WIDTH as f64 / width as f64;
    let scale_h = MAX_HEIGHT as f64 / height as f64;
    let scale = scale_w.min(scale_h);
    if scale >= 1.0 {
        (width, height)
    } else {
        (
            ((width as f64) * scale).round().max(1.0) as u32,
            ((height as f64) * scale).round().max(1.0) as u32,
        )
    }
}

/// Extract a `px` value for `property` from an inline style attribute.
fn style_pixel_value(style: &str, property: &str) -> Option<u32> {
    for declaration in style.split(';') {
        let (name, value) = match declaration.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };
        if !name.trim().eq_ignore_ascii_case(property) {
            continue;
        }
        return parse_dimension(value);
    }
    None
}

fn parse_dimension(value: &str) -> Option<u32> {
    let trimmed = value.trim().trim_end_matches("px").trim();
    let numeric: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let parsed = numeric.parse::<f64>().ok()?;
    (parsed >= 1.0).then_some(parsed.round() as u32)
}

/// Alignment from centering idioms in the inline style, else the nearest
/// aligned ancestor, else left.
fn resolve_alignment(request: &ImageRequest) -> Alignment {
    if let Some(style) = request.style {
        let lowered = style.to_ascii_lowercase();
        let auto_margin = lowered.contains("margin: auto")
            || lowered.contains("margin:auto")
            || (lowered.contains("margin-left") && lowered.contains("margin-right")
                && lowered.matches("auto").count() >= 2)
            || (lowered.contains("display: block") || lowered.contains("display:block"))
                && lowered.contains("auto");
        if auto_margin {
            return Alignment::Center;
        }
    }
    request.ancestor_alignment.unwrap_or(Alignment::Left)
}
