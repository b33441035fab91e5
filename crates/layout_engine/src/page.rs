//! Page size, orientation, and margins

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Standard page sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    #[default]
    Letter,
    /// Legal (8.5" x 14")
    Legal,
    /// A4 (210mm x 297mm)
    A4,
    /// A3 (297mm x 420mm)
    A3,
    /// Tabloid (11" x 17")
    Tabloid,
    /// Custom size in points
    Custom { width: f64, height: f64 },
}

impl PageSize {
    /// Get the width and height in points (portrait)
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::Tabloid => (792.0, 1224.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Same margin on all four sides
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        // One inch
        Self::uniform(72.0)
    }
}

/// Complete page geometry
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSetup {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
}

impl PageSetup {
    pub fn new(size: PageSize, orientation: Orientation, margins: Margins) -> Self {
        Self {
            size,
            orientation,
            margins,
        }
    }

    /// Page width and height in points, after orientation
    pub fn dimensions(&self) -> (f64, f64) {
        let (w, h) = self.size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn width(&self) -> f64 {
        self.dimensions().0
    }

    pub fn height(&self) -> f64 {
        self.dimensions().1
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.width() - self.margins.left - self.margins.right
    }

    /// Height between the top and bottom margins
    pub fn content_height(&self) -> f64 {
        self.height() - self.margins.top - self.margins.bottom
    }

    /// Check that the page has a positive size and room inside the margins
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.dimensions();
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "page size {}x{} must be positive",
                w, h
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(LayoutError::InvalidPageSetup(
                "margins must be non-negative".to_string(),
            ));
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margins leave no content area on a {}x{} page",
                w, h
            )));
        }
        Ok(())
    }
}
