//! 2D affine transform support for scroll-position compensation.
//!
//! Covers the subset of CSS `transform` values a computed style produces:
//! `matrix()` plus the individual translate/rotate/scale/skew functions, in
//! the column-vector convention `[a c e; b d f; 0 0 1]`.

/// A 2D affine transform matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2d {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

/// A transform matrix split into its geometric components.
///
/// `skew` is the shear factor applied along the x axis before rotation;
/// recomposition is `translate * rotate * shear * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew: f64,
}

impl Matrix2d {
    /// The identity transform
    pub fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    /// A pure translation
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self { e: tx, f: ty, ..Self::identity() }
    }

    /// A pure rotation by `radians`
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Matrix product `self * other` (apply `other` first)
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Parse a CSS transform list (`matrix(...)`, `translate(...)`,
    /// `rotate(...)`, `scale(...)`, `skewX(...)`, ...).
    ///
    /// Returns `None` for values the subset does not cover; `none` and the
    /// empty string parse as identity.
    pub fn parse(transform: &str) -> Option<Self> {
        let trimmed = transform.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Some(Self::identity());
        }

        let mut matrix = Self::identity();
        let mut rest = trimmed;
        while !rest.is_empty() {
            let open = rest.find('(')?;
            let close = rest.find(')')?;
            if close < open {
                return None;
            }
            let name = rest[..open].trim();
            let args: Vec<&str> = rest[open + 1..close]
                .split(',')
                .map(str::trim)
                .filter(|arg| !arg.is_empty())
                .collect();
            matrix = matrix.multiply(&Self::from_function(name, &args)?);
            rest = rest[close + 1..].trim_start();
        }
        Some(matrix)
    }

    fn from_function(name: &str, args: &[&str]) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "matrix" if args.len() == 6 => {
                let mut values = [0.0; 6];
                for (slot, arg) in values.iter_mut().zip(args) {
                    *slot = arg.parse().ok()?;
                }
                Some(Self {
                    a: values[0],
                    b: values[1],
                    c: values[2],
                    d: values[3],
                    e: values[4],
                    f: values[5],
                })
            }
            "translate" => {
                let tx = parse_length(args.first()?)?;
                let ty = args.get(1).map_or(Some(0.0), |arg| parse_length(arg))?;
                Some(Self::translation(tx, ty))
            }
            "translatex" => Some(Self::translation(parse_length(args.first()?)?, 0.0)),
            "translatey" => Some(Self::translation(0.0, parse_length(args.first()?)?)),
            "rotate" => Some(Self::rotation(parse_angle(args.first()?)?)),
            "scale" => {
                let sx = args.first()?.parse().ok()?;
                let sy = args.get(1).map_or(Some(sx), |arg| arg.parse().ok())?;
                Some(Self { a: sx, d: sy, ..Self::identity() })
            }
            "scalex" => Some(Self { a: args.first()?.parse().ok()?, ..Self::identity() }),
            "scaley" => Some(Self { d: args.first()?.parse().ok()?, ..Self::identity() }),
            "skew" => {
                let kx = parse_angle(args.first()?)?.tan();
                let ky = args.get(1).map_or(Some(0.0), |arg| parse_angle(arg).map(f64::tan))?;
                Some(Self { c: kx, b: ky, ..Self::identity() })
            }
            "skewx" => Some(Self { c: parse_angle(args.first()?)?.tan(), ..Self::identity() }),
            "skewy" => Some(Self { b: parse_angle(args.first()?)?.tan(), ..Self::identity() }),
            _ => None,
        }
    }

    /// Split the matrix into translation, rotation, scale, and skew
    pub fn decompose(&self) -> Decomposed {
        let scale_x = self.a.hypot(self.b);
        let rotation = self.b.atan2(self.a);
        let denom = scale_x * scale_x;
        let skew = if denom == 0.0 { 0.0 } else { (self.a * self.c + self.b * self.d) / denom };
        let scale_y = if scale_x == 0.0 {
            self.c.hypot(self.d)
        } else {
            (self.a * self.d - self.b * self.c) / scale_x
        };
        Decomposed {
            translate_x: self.e,
            translate_y: self.f,
            rotation,
            scale_x,
            scale_y,
            skew,
        }
    }

    /// Serialize as a CSS `matrix(...)` value
    pub fn to_css(&self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            fmt_number(self.a),
            fmt_number(self.b),
            fmt_number(self.c),
            fmt_number(self.d),
            fmt_number(self.e),
            fmt_number(self.f),
        )
    }
}

impl Decomposed {
    /// Rebuild the matrix as `translate * rotate * shear * scale`
    pub fn recompose(&self) -> Matrix2d {
        let (sin, cos) = self.rotation.sin_cos();
        Matrix2d {
            a: self.scale_x * cos,
            b: self.scale_x * sin,
            c: self.scale_x * self.skew * cos - self.scale_y * sin,
            d: self.scale_x * self.skew * sin + self.scale_y * cos,
            e: self.translate_x,
            f: self.translate_y,
        }
    }
}

/// Parse a CSS length, accepting bare numbers and `px` values
fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

/// Parse a CSS angle into radians
fn parse_angle(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if let Some(deg) = trimmed.strip_suffix("deg") {
        return deg.trim().parse::<f64>().ok().map(f64::to_radians);
    }
    if let Some(grad) = trimmed.strip_suffix("grad") {
        return grad.trim().parse::<f64>().ok().map(|g| g * std::f64::consts::PI / 200.0);
    }
    if let Some(rad) = trimmed.strip_suffix("rad") {
        return rad.trim().parse().ok();
    }
    if let Some(turn) = trimmed.strip_suffix("turn") {
        return turn.trim().parse::<f64>().ok().map(|t| t * std::f64::consts::TAU);
    }
    // Bare zero is the only valid unitless angle
    trimmed.parse::<f64>().ok().filter(|&v| v == 0.0)
}

fn fmt_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const EPSILON: f64 = 1e-9;

    fn assert_close(left: f64, right: f64) {
        assert!((left - right).abs() < EPSILON, "{left} != {right}");
    }

    #[test]
    fn test_parse_none_is_identity() {
        assert_eq!(Matrix2d::parse("none"), Some(Matrix2d::identity()));
        assert_eq!(Matrix2d::parse(""), Some(Matrix2d::identity()));
    }

    #[test]
    fn test_parse_matrix_function() {
        let matrix = Matrix2d::parse("matrix(1, 2, 3, 4, 5, 6)").expect("parse");
        assert_eq!(matrix, Matrix2d { a: 1.0, b: 2.0, c: 3.0, d: 4.0, e: 5.0, f: 6.0 });
    }

    #[test]
    fn test_parse_transform_list() {
        let matrix = Matrix2d::parse("translate(10px, 20px) rotate(90deg)").expect("parse");
        assert_close(matrix.e, 10.0);
        assert_close(matrix.f, 20.0);
        assert_close(matrix.a, 0.0);
        assert_close(matrix.b, 1.0);
    }

    #[test]
    fn test_parse_rejects_unknown_function() {
        assert!(Matrix2d::parse("perspective(100px)").is_none());
    }

    #[test]
    fn test_decompose_rotation() {
        let matrix = Matrix2d::parse("rotate(45deg)").expect("parse");
        let parts = matrix.decompose();
        assert_close(parts.rotation, FRAC_PI_4);
        assert_close(parts.scale_x, 1.0);
        assert_close(parts.scale_y, 1.0);
        assert_close(parts.skew, 0.0);
    }

    #[test]
    fn test_decompose_recompose_round_trip() {
        let matrix = Matrix2d::parse("translate(5px, -3px) rotate(30deg) scale(2, 0.5)").expect("parse");
        let rebuilt = matrix.decompose().recompose();
        assert_close(matrix.a, rebuilt.a);
        assert_close(matrix.b, rebuilt.b);
        assert_close(matrix.c, rebuilt.c);
        assert_close(matrix.d, rebuilt.d);
        assert_close(matrix.e, rebuilt.e);
        assert_close(matrix.f, rebuilt.f);
    }

    #[test]
    fn test_translation_offset_keeps_rotation() {
        let matrix = Matrix2d::parse("rotate(45deg)").expect("parse");
        let mut parts = matrix.decompose();
        parts.translate_x -= 10.0;
        parts.translate_y -= 20.0;
        let patched = parts.recompose().decompose();
        assert_close(patched.rotation, FRAC_PI_4);
        assert_close(patched.translate_x, -10.0);
        assert_close(patched.translate_y, -20.0);
    }

    #[test]
    fn test_to_css_round_trip() {
        let matrix = Matrix2d::translation(-10.0, -20.5);
        let css = matrix.to_css();
        assert_eq!(css, "matrix(1, 0, 0, 1, -10, -20.5)");
        assert_eq!(Matrix2d::parse(&css), Some(matrix));
    }
}
