//! Line-diagram scene and raster export.

use std::path::Path;

use log::{debug, info};
use tiny_skia::{Color, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::errors::ExportError;
use crate::geometry::{Bounds, Segment};
use crate::truss::Truss;

/// Smallest accepted zoom factor.
pub const MIN_ZOOM: f32 = 0.1;

/// Largest accepted zoom factor.
pub const MAX_ZOOM: f32 = 10.0;

/// Largest image, in pixels, that will be allocated (8192 × 8192).
pub const MAX_IMAGE_PIXELS: u64 = 1 << 26;

/// Settings for rasterizing a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Linear scale from truss units to pixels.
    pub zoom: f32,
    /// Line width in pixels, independent of zoom.
    pub stroke_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            stroke_width: 2.0,
        }
    }
}

impl RenderOptions {
    /// Check that the options describe a drawable image.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidZoom`] when the zoom lies outside
    /// [`MIN_ZOOM`]..=[`MAX_ZOOM`] and [`ExportError::InvalidStrokeWidth`] when
    /// the stroke width is not a positive number.
    pub fn validate(&self) -> Result<(), ExportError> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(ExportError::InvalidZoom {
                zoom: self.zoom,
                min: MIN_ZOOM,
                max: MAX_ZOOM,
            });
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(ExportError::InvalidStrokeWidth(self.stroke_width));
        }
        Ok(())
    }
}

/// The drawable part of a truss: one segment per resolved link.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Segments in link order.
    segments: Vec<Segment>,
    /// Rectangle enclosing every segment endpoint.
    bounds: Option<Bounds>,
}

impl Scene {
    /// Create a scene from explicit segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        let bounds = Bounds::enclosing(segments.iter().flat_map(|s| [s.start, s.end]));
        Self { segments, bounds }
    }

    /// Create the scene for every link of `truss` with both endpoints declared.
    ///
    /// # Examples
    /// ```
    /// use trussview::{Scene, Truss};
    ///
    /// let truss = Truss::parse("node, A, 0, 0\nnode, B, 3, 4\nlink, L1, A, B, 1, 1, steel\nlink, L2, A, Z, 1, 1, steel")
    ///     .expect("valid description");
    /// assert_eq!(Scene::from_truss(&truss).segments().len(), 1);
    /// ```
    #[must_use]
    pub fn from_truss(truss: &Truss) -> Self {
        Self::new(truss.segments())
    }

    /// Segments in link order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Rectangle enclosing the scene, or `None` when it is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pixel dimensions of the rendered image.
    ///
    /// The image covers the scene's bounding rectangle scaled by the zoom, with
    /// half a stroke of padding on every side.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyScene`] for an empty scene,
    /// [`ExportError::TooLarge`] when the image would exceed
    /// [`MAX_IMAGE_PIXELS`], or the validation error of `options`.
    pub fn image_size(&self, options: &RenderOptions) -> Result<(u32, u32), ExportError> {
        options.validate()?;
        let bounds = self.bounds.ok_or(ExportError::EmptyScene)?;
        let zoom = f64::from(options.zoom);
        let stroke = f64::from(options.stroke_width);
        let width = pixels(bounds.width() * zoom + stroke);
        let height = pixels(bounds.height() * zoom + stroke);

        let too_large = || ExportError::TooLarge {
            width,
            height,
            max_pixels: MAX_IMAGE_PIXELS,
        };
        if width.saturating_mul(height) > MAX_IMAGE_PIXELS {
            return Err(too_large());
        }
        Ok((
            u32::try_from(width).map_err(|_| too_large())?,
            u32::try_from(height).map_err(|_| too_large())?,
        ))
    }

    /// Draw the scene: black lines of uniform width on a white background.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the scene is empty, the options are invalid
    /// or the pixel surface cannot be allocated.
    pub fn rasterize(&self, options: &RenderOptions) -> Result<Pixmap, ExportError> {
        let (width, height) = self.image_size(options)?;
        let bounds = self.bounds.ok_or(ExportError::EmptyScene)?;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(ExportError::Allocation { width, height })?;
        pixmap.fill(Color::WHITE);

        let zoom = f64::from(options.zoom);
        let pad = f64::from(options.stroke_width) / 2.0;
        #[allow(clippy::cast_possible_truncation)]
        let to_pixel = |x: f64, y: f64| {
            (
                ((x - bounds.min.x) * zoom + pad) as f32,
                ((y - bounds.min.y) * zoom + pad) as f32,
            )
        };

        let mut builder = PathBuilder::new();
        for segment in &self.segments {
            let (x0, y0) = to_pixel(segment.start.x, segment.start.y);
            let (x1, y1) = to_pixel(segment.end.x, segment.end.y);
            builder.move_to(x0, y0);
            builder.line_to(x1, y1);
        }

        // A scene made only of zero-length links has no path to stroke.
        if let Some(path) = builder.finish() {
            let mut paint = Paint::default();
            paint.set_color(Color::BLACK);
            paint.anti_alias = true;
            let stroke = Stroke {
                width: options.stroke_width,
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        debug!(
            "rasterized {} segments into {width}x{height} px",
            self.segments.len()
        );
        Ok(pixmap)
    }

    /// Render the scene and encode it as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when rendering or encoding fails.
    pub fn encode_png(&self, options: &RenderOptions) -> Result<Vec<u8>, ExportError> {
        self.rasterize(options)?
            .encode_png()
            .map_err(|err| ExportError::Encode(err.to_string()))
    }

    /// Render the scene and write it to `path` as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when rendering, encoding or writing fails.
    pub fn export_png(
        &self,
        path: impl AsRef<Path>,
        options: &RenderOptions,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        let png = self.encode_png(options)?;
        std::fs::write(path, png).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("exported diagram to {}", path.display());
        Ok(())
    }
}

/// Round a pixel extent up to a whole, non-zero pixel count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(extent: f64) -> u64 {
    // Float-to-int casts saturate; NaN extents collapse to one pixel.
    extent.ceil().max(1.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    fn diagonal() -> Scene {
        Scene::new(vec![Segment::new(point(0.0, 0.0), point(10.0, 10.0))])
    }

    #[test]
    fn image_size_follows_bounds_zoom_and_stroke() {
        let scene = Scene::new(vec![Segment::new(point(0.0, 0.0), point(10.0, 5.0))]);
        let options = RenderOptions {
            zoom: 2.0,
            stroke_width: 2.0,
        };
        assert_eq!(scene.image_size(&options).expect("valid scene"), (22, 12));
    }

    #[test]
    fn flat_scene_is_still_one_stroke_tall() {
        let scene = Scene::new(vec![Segment::new(point(-5.0, 3.0), point(5.0, 3.0))]);
        let size = scene
            .image_size(&RenderOptions::default())
            .expect("valid scene");
        assert_eq!(size, (12, 2));
    }

    #[test]
    fn oversized_scene_is_rejected_before_allocation() {
        let text = "node, A, 0, 0\nnode, B, 1000000, 1000000\nlink, L, A, B, 1, 1, steel";
        let truss = Truss::parse(text).expect("valid description");
        let error = Scene::from_truss(&truss)
            .rasterize(&RenderOptions::default())
            .expect_err("image too large");
        match error {
            ExportError::TooLarge {
                width,
                height,
                max_pixels,
            } => {
                assert_eq!((width, height), (1_000_002, 1_000_002));
                assert_eq!(max_pixels, MAX_IMAGE_PIXELS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn image_at_pixel_budget_is_accepted() {
        let scene = Scene::new(vec![Segment::new(point(0.0, 0.0), point(8190.0, 8190.0))]);
        let size = scene
            .image_size(&RenderOptions::default())
            .expect("exactly at the budget");
        assert_eq!(size, (8192, 8192));
    }

    #[test]
    fn nan_coordinates_collapse_to_a_minimal_image() {
        let scene = Scene::new(vec![Segment::new(
            point(f64::NAN, 0.0),
            point(f64::NAN, 10.0),
        )]);
        let size = scene
            .image_size(&RenderOptions::default())
            .expect("NaN extents are not rejected");
        assert_eq!(size, (1, 12));
    }

    #[test]
    fn empty_scene_cannot_be_rendered() {
        let error = Scene::new(Vec::new())
            .rasterize(&RenderOptions::default())
            .expect_err("nothing to draw");
        assert!(matches!(error, ExportError::EmptyScene));
    }

    #[test]
    fn zoom_outside_range_is_rejected() {
        for zoom in [0.0, 0.05, 10.5, f32::NAN] {
            let options = RenderOptions {
                zoom,
                ..RenderOptions::default()
            };
            let error = diagonal().rasterize(&options).expect_err("bad zoom");
            assert!(matches!(error, ExportError::InvalidZoom { .. }), "{zoom}");
        }
    }

    #[test]
    fn non_positive_stroke_is_rejected() {
        let options = RenderOptions {
            stroke_width: 0.0,
            ..RenderOptions::default()
        };
        let error = diagonal().rasterize(&options).expect_err("bad stroke");
        assert!(matches!(error, ExportError::InvalidStrokeWidth(_)));
    }

    #[test]
    fn lines_are_black_on_white() {
        let pixmap = diagonal()
            .rasterize(&RenderOptions::default())
            .expect("renders");
        assert_eq!((pixmap.width(), pixmap.height()), (12, 12));

        let on_line = pixmap.pixel(6, 6).expect("inside image");
        assert!(on_line.red() < 128, "line pixel should be dark");

        let corner = pixmap.pixel(11, 0).expect("inside image");
        assert_eq!(
            (corner.red(), corner.green(), corner.blue(), corner.alpha()),
            (255, 255, 255, 255)
        );
    }

    #[test]
    fn encoded_output_is_png() {
        let bytes = diagonal()
            .encode_png(&RenderOptions::default())
            .expect("encodes");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
