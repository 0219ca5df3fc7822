use crate::types::{EyeShape, ModuleShape};

// Module/eye geometry
//------------------------------------------------------------------------------
//
// Pure path builders. Every function returns a closed SVG path fragment for
// one cell or one finder ("eye") region; callers guarantee a positive side
// length. Coordinates are emitted in pixel units with two decimals, which is
// exact for the integer-aligned grids the renderers produce.

fn n(v: f64) -> String {
    format!("{v:.2}")
}

/// Path for one generic dark module with its top-left corner at `(x, y)`.
pub fn module_path(shape: ModuleShape, x: f64, y: f64, side: f64) -> String {
    match shape {
        ModuleShape::Square => {
            format!("M{} {}h{}v{}h-{}z", n(x), n(y), n(side), n(side), n(side))
        }
        ModuleShape::Circle => circle_path(x + side / 2.0, y + side / 2.0, side / 2.0),
        ModuleShape::Diamond => {
            let c = side / 2.0;
            format!(
                "M{} {}L{} {}L{} {}L{} {}z",
                n(x + c),
                n(y),
                n(x + side),
                n(y + c),
                n(x + c),
                n(y + side),
                n(x),
                n(y + c)
            )
        }
    }
}

/// Centered circle drawn as two symmetric arcs.
fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    format!(
        "M{} {}a{} {} 0 1 0 {} 0a{} {} 0 1 0 -{} 0z",
        n(cx - r),
        n(cy),
        n(r),
        n(r),
        n(2.0 * r),
        n(r),
        n(r),
        n(2.0 * r)
    )
}

/// Axis-aligned rectangle subpath.
fn rect_path(x: f64, y: f64, w: f64, h: f64) -> String {
    format!("M{} {}h{}v{}h-{}z", n(x), n(y), n(w), n(h), n(w))
}

/// Rounded rectangle with quadratic corners. The leaf style rounds the
/// top-left and bottom-right corners and keeps the other two sharp.
fn leaf_path(x: f64, y: f64, side: f64, r: f64) -> String {
    let (x1, y1) = (x + side, y + side);
    format!(
        "M{} {}H{}V{}Q{} {} {} {}H{}V{}Q{} {} {} {}z",
        // top edge, starting after the rounded top-left corner
        n(x + r),
        n(y),
        n(x1),
        // right edge down to the bottom-right corner
        n(y1 - r),
        n(x1),
        n(y1),
        n(x1 - r),
        n(y1),
        // bottom edge back, left edge up to the top-left corner
        n(x),
        n(y + r),
        n(x),
        n(y),
        n(x + r),
        n(y)
    )
}

/// Ring path for one finder region: the 7-module outer boundary minus a
/// boundary inset inward by exactly one module. Rendered with even-odd fill
/// so the ring appears hollow.
pub fn eye_path(shape: EyeShape, x: f64, y: f64, module: f64) -> String {
    let outer = 7.0 * module;
    let inner = 5.0 * module;
    match shape {
        EyeShape::Square => format!(
            "{}{}",
            rect_path(x, y, outer, outer),
            rect_path(x + module, y + module, inner, inner)
        ),
        EyeShape::Circle => {
            let c = outer / 2.0;
            format!(
                "{}{}",
                circle_path(x + c, y + c, outer / 2.0),
                circle_path(x + c, y + c, inner / 2.0)
            )
        }
        EyeShape::Leaf => format!(
            "{}{}",
            leaf_path(x, y, outer, 2.5 * module),
            leaf_path(x + module, y + module, inner, 1.75 * module)
        ),
    }
}

/// Solid 3-module-wide eye center, positioned 2 modules inset from the eye's
/// top-left corner.
pub fn eye_center_path(shape: EyeShape, x: f64, y: f64, module: f64) -> String {
    let inset = 2.0 * module;
    let side = 3.0 * module;
    let (cx, cy) = (x + inset, y + inset);
    match shape {
        EyeShape::Square => rect_path(cx, cy, side, side),
        EyeShape::Circle => circle_path(cx + side / 2.0, cy + side / 2.0, side / 2.0),
        EyeShape::Leaf => leaf_path(cx, cy, side, module),
    }
}

#[cfg(test)]
mod geometry_tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ModuleShape::Square)]
    #[test_case(ModuleShape::Circle)]
    #[test_case(ModuleShape::Diamond)]
    fn module_paths_are_closed(shape: ModuleShape) {
        let p = module_path(shape, 10.0, 20.0, 8.0);
        assert!(p.starts_with('M'));
        assert!(p.ends_with('z'));
    }

    #[test]
    fn square_module_path_is_exact() {
        assert_eq!(module_path(ModuleShape::Square, 4.0, 6.0, 2.0), "M4.00 6.00h2.00v2.00h-2.00z");
    }

    #[test_case(EyeShape::Square)]
    #[test_case(EyeShape::Circle)]
    #[test_case(EyeShape::Leaf)]
    fn eye_paths_contain_two_subpaths(shape: EyeShape) {
        let p = eye_path(shape, 0.0, 0.0, 10.0);
        // Outer boundary plus inner boundary, each a closed subpath.
        assert_eq!(p.matches('M').count(), 2);
        assert_eq!(p.matches('z').count(), 2);
    }

    #[test_case(EyeShape::Square)]
    #[test_case(EyeShape::Circle)]
    #[test_case(EyeShape::Leaf)]
    fn eye_centers_are_single_subpaths(shape: EyeShape) {
        let p = eye_center_path(shape, 0.0, 0.0, 10.0);
        assert_eq!(p.matches('M').count(), 1);
        assert!(p.ends_with('z'));
    }

    #[test]
    fn eye_center_sits_two_modules_in() {
        let p = eye_center_path(EyeShape::Square, 100.0, 100.0, 10.0);
        assert_eq!(p, "M120.00 120.00h30.00v30.00h-30.00z");
    }
}
