use qrcode::{EcLevel, QrCode};

use crate::error::{Error, Result};

// Module matrix
//------------------------------------------------------------------------------

/// Read-only module grid for one symbol, derived once per request from the
/// encoder primitive and never mutated. Error correction is pinned at level
/// High so the symbol tolerates an embedded logo covering its center.
#[derive(Debug, Clone)]
pub struct ModuleMatrix {
    width: usize,
    dark: Vec<bool>,
}

/// How one cell is rendered. The three 7x7 finder regions are drawn by the
/// eye paths, not the generic module path; a 3x3 sub-region inside each eye
/// is the eye center, drawn by its own path.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CellClass {
    /// Part of a finder ring (outer 7x7 minus the 5x5 hole).
    EyeOuter,
    /// Part of a 3x3 eye center, inset 2 modules from the eye corner.
    EyeCenter,
    /// Dark cell outside the finder regions.
    Dark,
    Light,
}

/// Top-left module coordinate of each finder region.
pub const EYE_SIDE: usize = 7;

impl ModuleMatrix {
    pub fn encode(payload: &str) -> Result<Self> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
            .map_err(|_| Error::QrEncode)?;
        let width = code.width();
        let colors = code.to_colors();
        let dark = colors.iter().map(|c| *c == qrcode::Color::Dark).collect();
        Ok(Self { width, dark })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    /// The three eye origins: top-left, top-right, bottom-left.
    pub fn eye_origins(&self) -> [(usize, usize); 3] {
        let far = self.width - EYE_SIDE;
        [(0, 0), (far, 0), (0, far)]
    }

    pub fn classify(&self, x: usize, y: usize) -> CellClass {
        for (ex, ey) in self.eye_origins() {
            if x >= ex && x < ex + EYE_SIDE && y >= ey && y < ey + EYE_SIDE {
                let (dx, dy) = (x - ex, y - ey);
                let in_center = (2..5).contains(&dx) && (2..5).contains(&dy);
                let in_hole = (1..6).contains(&dx) && (1..6).contains(&dy);
                return if in_center {
                    CellClass::EyeCenter
                } else if in_hole {
                    CellClass::Light
                } else {
                    CellClass::EyeOuter
                };
            }
        }
        if self.is_dark(x, y) {
            CellClass::Dark
        } else {
            CellClass::Light
        }
    }

    pub fn count_dark_modules(&self) -> usize {
        self.dark.iter().filter(|&&d| d).count()
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::*;

    #[test]
    fn width_is_odd_and_at_least_21() {
        let m = ModuleMatrix::encode("https://example.com").unwrap();
        assert!(m.width() >= 21);
        assert_eq!(m.width() % 2, 1);
    }

    #[test]
    fn empty_payload_fails() {
        assert!(matches!(ModuleMatrix::encode(""), Err(Error::EmptyPayload)));
    }

    #[test]
    fn eye_corners_are_dark_rings() {
        let m = ModuleMatrix::encode("hello").unwrap();
        for (ex, ey) in m.eye_origins() {
            // Ring corners and center are dark in every valid symbol.
            assert!(m.is_dark(ex, ey));
            assert!(m.is_dark(ex + 6, ey + 6));
            assert!(m.is_dark(ex + 3, ey + 3));
            assert_eq!(m.classify(ex, ey), CellClass::EyeOuter);
            assert_eq!(m.classify(ex + 3, ey + 3), CellClass::EyeCenter);
            assert_eq!(m.classify(ex + 1, ey + 1), CellClass::Light);
        }
    }

    /// Eye-outer, eye-center and generic dark counts partition the dark cells
    /// with no double counting.
    #[test]
    fn classification_partitions_dark_cells() {
        let m = ModuleMatrix::encode("https://acme.example/qr").unwrap();
        let w = m.width();
        let mut outer = 0;
        let mut center = 0;
        let mut generic = 0;
        for y in 0..w {
            for x in 0..w {
                if !m.is_dark(x, y) {
                    continue;
                }
                match m.classify(x, y) {
                    CellClass::EyeOuter => outer += 1,
                    CellClass::EyeCenter => center += 1,
                    CellClass::Dark => generic += 1,
                    CellClass::Light => {}
                }
            }
        }
        // 24 ring cells and 9 center cells per eye, three eyes.
        assert_eq!(outer, 3 * 24);
        assert_eq!(center, 3 * 9);
        assert_eq!(outer + center + generic, m.count_dark_modules());
    }
}
