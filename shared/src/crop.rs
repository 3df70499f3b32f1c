//! Fixed-aspect crop selection for the cover preview dialog.

/// Crop rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CropRect {
    /// Largest rectangle of `aspect` (width / height) centered in an image of
    /// the given size. Degenerate inputs yield an empty rectangle.
    pub fn centered(image_width: f64, image_height: f64, aspect: f64) -> Self {
        if !(image_width > 0.0 && image_height > 0.0 && aspect > 0.0) {
            return Self {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            };
        }
        let (width, height) = if image_width / image_height > aspect {
            (image_height * aspect, image_height)
        } else {
            (image_width, image_width / aspect)
        };
        Self {
            x: (image_width - width) / 2.0,
            y: (image_height - height) / 2.0,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Movable, zoomable selection kept inside the image and locked to an
/// aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSelection {
    image_width: f64,
    image_height: f64,
    aspect: f64,
    rect: CropRect,
}

/// Smallest zoom-in, relative to the largest possible rectangle.
const MIN_SCALE: f64 = 0.1;

impl CropSelection {
    /// Starts at the largest centered rectangle.
    pub fn new(image_width: f64, image_height: f64, aspect: f64) -> Self {
        Self {
            image_width,
            image_height,
            aspect,
            rect: CropRect::centered(image_width, image_height, aspect),
        }
    }

    /// Current rectangle.
    pub fn rect(&self) -> CropRect {
        self.rect
    }

    /// Aspect ratio the selection is locked to.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Shifts the selection by `(dx, dy)`, clamped to the image bounds.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        let max_x = (self.image_width - self.rect.width).max(0.0);
        let max_y = (self.image_height - self.rect.height).max(0.0);
        self.rect.x = (self.rect.x + dx).clamp(0.0, max_x);
        self.rect.y = (self.rect.y + dy).clamp(0.0, max_y);
    }

    /// Resizes around the current center. `scale` is relative to the largest
    /// rectangle that fits, so `1.0` is fully zoomed out.
    pub fn set_scale(&mut self, scale: f64) {
        let full = CropRect::centered(self.image_width, self.image_height, self.aspect);
        if full.is_empty() {
            return;
        }
        let scale = scale.clamp(MIN_SCALE, 1.0);
        let center_x = self.rect.x + self.rect.width / 2.0;
        let center_y = self.rect.y + self.rect.height / 2.0;
        self.rect.width = full.width * scale;
        self.rect.height = full.height * scale;
        self.rect.x = center_x - self.rect.width / 2.0;
        self.rect.y = center_y - self.rect.height / 2.0;
        self.move_by(0.0, 0.0);
    }
}
