//! Canvas composition for the front-end QR label

use super::{LabelFont, QrDecoder, QrEncoder, QrPayload};
use crate::config::QrOptions;
use crate::error::{Error, Result};
use image::{DynamicImage, Rgb, RgbImage, imageops};
use std::path::{Path, PathBuf};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Fixed label geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Side of the resized QR code
    pub qr_size: u32,
    /// Offset of the QR code from the canvas top-left corner
    pub inset: u32,
    /// Top edge of the title line
    pub title_y: i32,
    /// Top edge of the subtitle line
    pub subtitle_y: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            canvas_width: 350,
            canvas_height: 380,
            qr_size: 300,
            inset: 25,
            title_y: 340,
            subtitle_y: 365,
        }
    }
}

impl Layout {
    /// Left edge that horizontally centers a line of `text_width` pixels.
    pub fn centered_x(&self, text_width: u32) -> i32 {
        (self.canvas_width as i32 - text_width as i32).div_euclid(2)
    }
}

/// Builds QR labels: code on top, title and subtitle centered beneath
#[derive(Debug)]
pub struct QrComposer {
    encoder: QrEncoder,
    layout: Layout,
    title: String,
    subtitle: String,
    title_font: LabelFont,
    subtitle_font: LabelFont,
}

impl QrComposer {
    /// Create a composer with explicit text and fonts.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        title_font: LabelFont,
        subtitle_font: LabelFont,
    ) -> Self {
        Self {
            encoder: QrEncoder::new(),
            layout: Layout::default(),
            title: title.into(),
            subtitle: subtitle.into(),
            title_font,
            subtitle_font,
        }
    }

    /// Create a composer from configuration, loading fonts with fallback.
    pub fn from_options(options: &QrOptions) -> Self {
        let font = options.font.as_deref();
        Self::new(
            options.title.clone(),
            options.subtitle.clone(),
            LabelFont::load_or_builtin(font, options.title_size),
            LabelFont::load_or_builtin(font, options.subtitle_size),
        )
    }

    /// Label geometry in use
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether either text line is rendered with the built-in font
    pub fn uses_builtin_font(&self) -> bool {
        self.title_font.is_builtin() || self.subtitle_font.is_builtin()
    }

    /// Render the label for `url`, to be written to `output`.
    pub fn compose(&self, url: &str, output: impl Into<PathBuf>) -> Result<QrArtifact> {
        let layout = self.layout;
        let code = self.encoder.encode_string(url, layout.qr_size)?;
        let code = DynamicImage::ImageLuma8(code).to_rgb8();

        let mut canvas = RgbImage::from_pixel(layout.canvas_width, layout.canvas_height, WHITE);
        imageops::replace(&mut canvas, &code, layout.inset.into(), layout.inset.into());

        let (title_width, _) = self.title_font.measure(&self.title);
        self.title_font.draw(
            &mut canvas,
            BLACK,
            layout.centered_x(title_width),
            layout.title_y,
            &self.title,
        );

        let (subtitle_width, _) = self.subtitle_font.measure(&self.subtitle);
        self.subtitle_font.draw(
            &mut canvas,
            GRAY,
            layout.centered_x(subtitle_width),
            layout.subtitle_y,
            &self.subtitle,
        );

        Ok(QrArtifact {
            source_url: url.to_string(),
            canvas,
            output_path: output.into(),
            layout,
        })
    }
}

/// A composed label held in memory until saved
#[derive(Debug, Clone)]
pub struct QrArtifact {
    source_url: String,
    canvas: RgbImage,
    output_path: PathBuf,
    layout: Layout,
}

impl QrArtifact {
    /// URL encoded in the code
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Composed canvas
    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Destination file
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the canvas to its output path, replacing any previous file.
    pub fn save(&self) -> Result<()> {
        self.canvas.save(&self.output_path)?;
        tracing::info!(path = %self.output_path.display(), "QR label saved");
        Ok(())
    }

    /// Decode the QR region of the canvas.
    pub fn decode(&self) -> Result<QrPayload> {
        let Layout { inset, qr_size, .. } = self.layout;
        QrDecoder::new().decode_region(&self.canvas, inset, inset, qr_size, qr_size)
    }

    /// Check that the QR region decodes back to the source URL.
    pub fn verify(&self) -> Result<()> {
        let payload = self.decode()?;
        match payload.as_str() {
            Some(text) if text == self.source_url => Ok(()),
            other => Err(Error::QrDecode(format!(
                "label decodes to {:?}, expected {:?}",
                other, self.source_url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_composer() -> QrComposer {
        QrComposer::new(
            "Library Management System",
            "Scan to access the library",
            LabelFont::builtin(20.0),
            LabelFont::builtin(14.0),
        )
    }

    #[test]
    fn test_centered_x_floors() {
        let layout = Layout::default();
        assert_eq!(layout.centered_x(100), 125);
        assert_eq!(layout.centered_x(101), 124);
        assert_eq!(layout.centered_x(351), -1);
    }

    #[test]
    fn test_canvas_geometry() {
        let artifact = builtin_composer()
            .compose("http://localhost:6969/frontend", "label.png")
            .unwrap();
        let canvas = artifact.canvas();

        assert_eq!(canvas.dimensions(), (350, 380));
        // Margin left of the code stays white
        assert_eq!(canvas.get_pixel(10, 10), &WHITE);
        assert_eq!(canvas.get_pixel(340, 200), &WHITE);
        // Center of the top-left finder pattern inside the pasted code
        let corner = canvas.get_pixel(25 + 68, 25 + 68);
        assert!(corner.0[0] < 64, "expected dark finder module, got {:?}", corner);
    }

    #[test]
    fn test_text_lines_drawn_below_code() {
        let artifact = builtin_composer()
            .compose("http://localhost:6969/frontend", "label.png")
            .unwrap();
        let canvas = artifact.canvas();

        let title_band = (340..354).any(|y| (0..350).any(|x| canvas.get_pixel(x, y) == &BLACK));
        let subtitle_band =
            (365..372).any(|y| (0..350).any(|x| canvas.get_pixel(x, y) == &GRAY));
        assert!(title_band);
        assert!(subtitle_band);
    }

    #[test]
    fn test_verify_decodes_source_url() {
        let artifact = builtin_composer()
            .compose("http://localhost:8080/index.html", "label.png")
            .unwrap();
        assert_eq!(artifact.source_url(), "http://localhost:8080/index.html");
        assert_eq!(
            artifact.decode().unwrap().as_str(),
            Some(artifact.source_url())
        );
        artifact.verify().unwrap();
    }

    #[test]
    fn test_urls_of_many_lengths_decode_exactly() {
        let composer = builtin_composer();
        for len in [0, 1, 17, 18, 25, 32, 53, 64, 128, 256, 384, 509] {
            let url: String = "http://localhost:8080/"
                .chars()
                .chain(std::iter::repeat('x'))
                .take(len)
                .collect();
            let artifact = composer.compose(&url, "label.png").unwrap();
            let payload = artifact.decode().unwrap();
            assert_eq!(payload.as_str(), Some(url.as_str()), "length {len}");
        }
    }

    #[test]
    fn test_scalable_font_label() {
        let font = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/DejaVuSans.ttf"
        ));
        let composer = QrComposer::from_options(&QrOptions {
            font: Some(font.to_path_buf()),
            ..QrOptions::default()
        });
        assert!(!composer.uses_builtin_font());

        let layout = composer.layout();
        let artifact = composer
            .compose("http://localhost:6969/frontend", "label.png")
            .unwrap();
        let canvas = artifact.canvas();

        // Text is anti-aliased, so look for any non-white pixel
        let inked = |rows: std::ops::Range<u32>| {
            rows.into_iter()
                .any(|y| (0..layout.canvas_width).any(|x| canvas.get_pixel(x, y) != &WHITE))
        };
        assert!(inked(340..360));
        assert!(inked(365..380));
        artifact.verify().unwrap();
    }
}
