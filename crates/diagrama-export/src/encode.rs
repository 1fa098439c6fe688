//! Diagram encoding: SVG serialization, rasterisation, and data URIs.
//!
//! Takes a snapshot of the diagram's markup ([`SvgGraphic`]) and turns
//! it into one of the export formats. Rasterisation parses the markup
//! with `usvg` and renders it with `resvg` onto a pixmap pre-filled with
//! the background color, then encodes PNG or JPEG bytes with the
//! [`image`] crate.
//!
//! Text is shaped with a bundled DejaVu Sans face, registered for
//! every generic family, since a wasm build cannot see the browser's
//! fonts.
//!
//! Everything here is pure: no browser APIs, no I/O.

use std::sync::{Arc, OnceLock};

use base64::Engine;
use image::ImageEncoder;
use resvg::{tiny_skia, usvg};

use crate::color::{ColorError, Rgba};
use crate::format::ExportFormat;
use crate::options::ExportOptions;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const FONT_FAMILY: &str = "DejaVu Sans";

/// Errors that can occur while encoding a diagram snapshot.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The background color string could not be parsed.
    #[error("invalid background color: {0}")]
    Color(#[from] ColorError),

    /// The markup does not contain an `<svg>` element.
    #[error("graphic markup has no <svg> root element")]
    MissingRoot,

    /// `usvg` rejected the markup.
    #[error("failed to parse SVG: {0}")]
    Parse(String),

    /// The pixmap could not be allocated at the requested size.
    #[error("graphic too large to rasterise: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    /// PNG or JPEG encoding failed.
    #[error("{format} encoding failed: {message}")]
    Image {
        format: ExportFormat,
        message: String,
    },
}

/// Rendered size of the graphic in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicSize {
    pub width: f32,
    pub height: f32,
}

impl GraphicSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions, rounded up so no edge is cut off.
    #[must_use]
    pub fn pixels(self) -> (u32, u32) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = |v: f32| if v.is_finite() && v > 0.0 { v.ceil() as u32 } else { 0 };
        (px(self.width), px(self.height))
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        let (w, h) = self.pixels();
        w == 0 || h == 0
    }

    /// Size multiplied by `factor`; unchanged for a non-positive or
    /// non-finite factor.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self::new(self.width * factor, self.height * factor)
        } else {
            self
        }
    }
}

/// Snapshot of the diagram to export.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgGraphic {
    /// Serialized `<svg>` element (its outer markup).
    pub markup: String,
    /// Size the element is rendered at. `None` uses the size declared
    /// in the markup.
    pub size: Option<GraphicSize>,
    /// Device pixels per CSS pixel. Rasters are drawn at
    /// `size * pixel_ratio`.
    pub pixel_ratio: f32,
}

impl SvgGraphic {
    #[must_use]
    pub fn new(markup: impl Into<String>, size: Option<GraphicSize>) -> Self {
        Self {
            markup: markup.into(),
            size,
            pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }
}

/// Encoded bytes together with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Base64 `data:` URI, usable directly as a download `href`.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.mime_type)
    }
}

/// Encode `graphic` in `format` using the background and quality from
/// `options`.
///
/// Returns `Ok(None)` when the graphic has a zero-area rendered size,
/// i.e. there is nothing to draw.
///
/// # Errors
///
/// See [`EncodeError`].
pub fn encode(
    graphic: &SvgGraphic,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Option<EncodedImage>, EncodeError> {
    if graphic.size.is_some_and(GraphicSize::is_empty) {
        return Ok(None);
    }
    let background = options.background()?;

    match format {
        ExportFormat::Svg => {
            let markup = svg_with_background(&graphic.markup, background)?;
            Ok(Some(EncodedImage {
                mime_type: format.mime_type(),
                bytes: markup.into_bytes(),
            }))
        }
        ExportFormat::Png => {
            let Some(pixels) = rasterize(graphic, background)? else {
                return Ok(None);
            };
            encode_png(&pixels).map(Some)
        }
        ExportFormat::Jpeg => {
            // No alpha channel: composite over black like a browser canvas.
            let Some(pixels) = rasterize(graphic, background.over(Rgba::BLACK))? else {
                return Ok(None);
            };
            encode_jpeg(&pixels, options.jpeg_quality()).map(Some)
        }
    }
}

/// Straight-alpha RGBA pixels produced by [`rasterize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub rgba: Vec<u8>,
}

impl RasterImage {
    /// Pixel at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = self.rgba.get(i..i + 4)?;
        Some(Rgba {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
    }
}

/// Font database shared by every rasterisation.
fn fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    Arc::clone(FONTS.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(FONT_DATA.to_vec());
        db.set_serif_family(FONT_FAMILY);
        db.set_sans_serif_family(FONT_FAMILY);
        db.set_cursive_family(FONT_FAMILY);
        db.set_fantasy_family(FONT_FAMILY);
        db.set_monospace_family(FONT_FAMILY);
        Arc::new(db)
    }))
}

fn parse_options() -> usvg::Options<'static> {
    usvg::Options {
        font_family: FONT_FAMILY.to_owned(),
        fontdb: fonts(),
        ..usvg::Options::default()
    }
}

/// Render the graphic over a `background`-filled canvas.
///
/// The canvas matches the graphic's rendered size when known, otherwise
/// the size declared by the markup, times its pixel ratio. Returns
/// `Ok(None)` for a zero-area canvas.
///
/// # Errors
///
/// Returns [`EncodeError::MissingRoot`] or [`EncodeError::Parse`] for
/// unusable markup and [`EncodeError::TooLarge`] if the pixmap cannot be
/// allocated.
pub fn rasterize(
    graphic: &SvgGraphic,
    background: Rgba,
) -> Result<Option<RasterImage>, EncodeError> {
    if graphic.size.is_some_and(GraphicSize::is_empty) {
        return Ok(None);
    }

    let markup = ensure_namespace(&graphic.markup)?;
    let tree = usvg::Tree::from_str(&markup, &parse_options())
        .map_err(|e| EncodeError::Parse(e.to_string()))?;
    let declared = GraphicSize::new(tree.size().width(), tree.size().height());
    let target = graphic
        .size
        .unwrap_or(declared)
        .scaled(graphic.pixel_ratio);
    let (width, height) = target.pixels();
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(EncodeError::TooLarge { width, height })?;
    pixmap.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        background.a,
    ));

    let transform = tiny_skia::Transform::from_scale(
        target.width / declared.width,
        target.height / declared.height,
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Ok(Some(RasterImage {
        width,
        height,
        rgba,
    }))
}

/// Encode straight RGBA pixels as PNG.
///
/// # Errors
///
/// Returns [`EncodeError::Image`] if the encoder fails.
pub fn encode_png(image: &RasterImage) -> Result<EncodedImage, EncodeError> {
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(
            &image.rgba,
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::Image {
            format: ExportFormat::Png,
            message: e.to_string(),
        })?;
    Ok(EncodedImage {
        mime_type: ExportFormat::Png.mime_type(),
        bytes,
    })
}

/// Encode as JPEG at `quality` (1–100), dropping the alpha channel.
///
/// # Errors
///
/// Returns [`EncodeError::Image`] if the encoder fails.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<EncodedImage, EncodeError> {
    let rgb: Vec<u8> = image
        .rgba
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .write_image(
            &rgb,
            image.width,
            image.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::Image {
            format: ExportFormat::Jpeg,
            message: e.to_string(),
        })?;
    Ok(EncodedImage {
        mime_type: ExportFormat::Jpeg.mime_type(),
        bytes,
    })
}

/// Standalone SVG document with the background painted in.
///
/// Adds the SVG namespace when the markup lacks it (HTML serialization
/// of inline SVG omits it) and, unless `background` is transparent,
/// inserts a full-size `<rect>` as the root's first child.
///
/// # Errors
///
/// Returns [`EncodeError::MissingRoot`] if there is no `<svg` start tag.
pub fn svg_with_background(markup: &str, background: Rgba) -> Result<String, EncodeError> {
    let markup = ensure_namespace(markup)?;
    if background.is_transparent() {
        return Ok(markup);
    }

    let root = find_root_tag(&markup)?;
    let rect = if background.is_opaque() {
        format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            background.to_hex()
        )
    } else {
        format!(
            r#"<rect width="100%" height="100%" fill="{}" fill-opacity="{:.3}"/>"#,
            Rgba { a: 255, ..background }.to_hex(),
            f32::from(background.a) / 255.0
        )
    };

    let mut out = String::with_capacity(markup.len() + rect.len() + 8);
    if root.self_closing {
        // `<svg .../>` → `<svg ...><rect/></svg>`
        out.push_str(markup[..root.end - 2].trim_end());
        out.push('>');
        out.push_str(&rect);
        out.push_str("</svg>");
        out.push_str(&markup[root.end..]);
    } else {
        out.push_str(&markup[..root.end]);
        out.push_str(&rect);
        out.push_str(&markup[root.end..]);
    }
    Ok(out)
}

/// Location of the root `<svg ...>` start tag.
struct RootTag {
    start: usize,
    /// Byte offset just past the closing `>`.
    end: usize,
    self_closing: bool,
}

fn find_root_tag(markup: &str) -> Result<RootTag, EncodeError> {
    let start = markup
        .match_indices("<svg")
        .map(|(i, _)| i)
        .find(|&i| {
            markup[i + 4..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
        })
        .ok_or(EncodeError::MissingRoot)?;

    // Scan to the closing `>`, skipping quoted attribute values.
    let mut quote: Option<char> = None;
    for (offset, c) in markup[start..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => {
                let end = start + offset + 1;
                let self_closing = markup[..end - 1].ends_with('/');
                return Ok(RootTag {
                    start,
                    end,
                    self_closing,
                });
            }
            (None, _) => {}
        }
    }
    Err(EncodeError::MissingRoot)
}

/// Declare the SVG namespace, and the XLink one when `xlink:` attributes
/// are used, on the root tag if they are missing.
fn ensure_namespace(markup: &str) -> Result<String, EncodeError> {
    let root = find_root_tag(markup)?;
    let tag = &markup[root.start..root.end];

    let mut decls = String::new();
    if !tag.contains("xmlns=") {
        decls.push_str(&format!(r#" xmlns="{SVG_NS}""#));
    }
    if markup.contains("xlink:") && !tag.contains("xmlns:xlink=") {
        decls.push_str(&format!(r#" xmlns:xlink="{XLINK_NS}""#));
    }
    if decls.is_empty() {
        return Ok(markup.to_owned());
    }

    let insert_at = root.start + 4;
    let mut out = String::with_capacity(markup.len() + decls.len());
    out.push_str(&markup[..insert_at]);
    out.push_str(&decls);
    out.push_str(&markup[insert_at..]);
    Ok(out)
}
