//! Cross-section shape parameters.

use smallvec::{SmallVec, smallvec};

use super::ShapeKind;
use crate::{Error, Result};

/// A bag of named numeric values tagged with a shape kind.
///
/// This is all the serializer needs to know about a section's dimensions.
pub trait ShapeParameters: std::fmt::Debug + Send + Sync {
    fn shape_kind(&self) -> ShapeKind;

    /// Named values in a stable order.
    fn named_values(&self) -> SmallVec<[(&str, f64); 6]>;
}

/// Built-in section parameter sets. Dimensions are in model units.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionParameters {
    Rectangular { height: f64, width: f64 },
    Circular { diameter: f64 },
    ISection {
        height: f64,
        width: f64,
        web_thickness: f64,
        flange_thickness: f64,
        fillet_radius: f64,
    },
    RectangularHollow { height: f64, width: f64, wall_thickness: f64 },
    CircularHollow { diameter: f64, wall_thickness: f64 },
    Custom { values: Vec<(String, f64)> },
}

fn dimension(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::invalid(parameter, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(Error::invalid(parameter, format!("must not be negative, got {value}")));
    }
    Ok(value)
}

impl SectionParameters {
    pub fn rectangular(height: f64, width: f64) -> Result<Self> {
        Ok(SectionParameters::Rectangular {
            height: dimension("height", height)?,
            width: dimension("width", width)?,
        })
    }

    pub fn circular(diameter: f64) -> Result<Self> {
        Ok(SectionParameters::Circular { diameter: dimension("diameter", diameter)? })
    }

    pub fn i_section(
        height: f64,
        width: f64,
        web_thickness: f64,
        flange_thickness: f64,
        fillet_radius: f64,
    ) -> Result<Self> {
        Ok(SectionParameters::ISection {
            height: dimension("height", height)?,
            width: dimension("width", width)?,
            web_thickness: dimension("web_thickness", web_thickness)?,
            flange_thickness: dimension("flange_thickness", flange_thickness)?,
            fillet_radius: dimension("fillet_radius", fillet_radius)?,
        })
    }

    pub fn rectangular_hollow(height: f64, width: f64, wall_thickness: f64) -> Result<Self> {
        Ok(SectionParameters::RectangularHollow {
            height: dimension("height", height)?,
            width: dimension("width", width)?,
            wall_thickness: dimension("wall_thickness", wall_thickness)?,
        })
    }

    pub fn circular_hollow(diameter: f64, wall_thickness: f64) -> Result<Self> {
        Ok(SectionParameters::CircularHollow {
            diameter: dimension("diameter", diameter)?,
            wall_thickness: dimension("wall_thickness", wall_thickness)?,
        })
    }

    /// Free-form named parameters, held to the same range rules as the
    /// built-in shapes.
    pub fn custom<K: Into<String>>(values: impl IntoIterator<Item = (K, f64)>) -> Result<Self> {
        let values = values
            .into_iter()
            .map(|(k, v)| {
                let k = k.into();
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::invalid(
                        "values",
                        format!("`{k}` must be finite and not negative, got {v}"),
                    ));
                }
                Ok((k, v))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SectionParameters::Custom { values })
    }

    /// Re-check every dimension. Catches values written straight into the
    /// variants, bypassing the constructors.
    pub fn validate(&self) -> Result<()> {
        let checked = match self {
            SectionParameters::Rectangular { height, width } => Self::rectangular(*height, *width),
            SectionParameters::Circular { diameter } => Self::circular(*diameter),
            SectionParameters::ISection { height, width, web_thickness, flange_thickness, fillet_radius } => {
                Self::i_section(*height, *width, *web_thickness, *flange_thickness, *fillet_radius)
            }
            SectionParameters::RectangularHollow { height, width, wall_thickness } => {
                Self::rectangular_hollow(*height, *width, *wall_thickness)
            }
            SectionParameters::CircularHollow { diameter, wall_thickness } => {
                Self::circular_hollow(*diameter, *wall_thickness)
            }
            SectionParameters::Custom { values } => Self::custom(values.iter().map(|(k, v)| (k.as_str(), *v))),
        };
        checked.map(|_| ())
    }

    /// Gross area where the shape defines one and its dimensions are valid.
    pub fn area(&self) -> Option<f64> {
        use std::f64::consts::PI;
        self.validate().ok()?;
        match *self {
            SectionParameters::Rectangular { height, width } => Some(height * width),
            SectionParameters::Circular { diameter } => Some(PI * diameter * diameter / 4.0),
            SectionParameters::ISection { height, width, web_thickness, flange_thickness, .. } => {
                Some(2.0 * width * flange_thickness + (height - 2.0 * flange_thickness) * web_thickness)
            }
            SectionParameters::RectangularHollow { height, width, wall_thickness } => {
                let inner_h = (height - 2.0 * wall_thickness).max(0.0);
                let inner_w = (width - 2.0 * wall_thickness).max(0.0);
                Some(height * width - inner_h * inner_w)
            }
            SectionParameters::CircularHollow { diameter, wall_thickness } => {
                let inner = (diameter - 2.0 * wall_thickness).max(0.0);
                Some(PI * (diameter * diameter - inner * inner) / 4.0)
            }
            SectionParameters::Custom { .. } => None,
        }
    }
}

impl ShapeParameters for SectionParameters {
    fn shape_kind(&self) -> ShapeKind {
        match self {
            SectionParameters::Rectangular { .. } => ShapeKind::Rectangular,
            SectionParameters::Circular { .. } => ShapeKind::Circular,
            SectionParameters::ISection { .. } => ShapeKind::ISection,
            SectionParameters::RectangularHollow { .. } => ShapeKind::RectangularHollow,
            SectionParameters::CircularHollow { .. } => ShapeKind::CircularHollow,
            SectionParameters::Custom { .. } => ShapeKind::Custom,
        }
    }

    fn named_values(&self) -> SmallVec<[(&str, f64); 6]> {
        match self {
            SectionParameters::Rectangular { height, width } => {
                smallvec![("Height", *height), ("Width", *width)]
            }
            SectionParameters::Circular { diameter } => smallvec![("Diameter", *diameter)],
            SectionParameters::ISection { height, width, web_thickness, flange_thickness, fillet_radius } => {
                smallvec![
                    ("Height", *height),
                    ("Width", *width),
                    ("WebThickness", *web_thickness),
                    ("FlangeThickness", *flange_thickness),
                    ("FilletRadius", *fillet_radius),
                ]
            }
            SectionParameters::RectangularHollow { height, width, wall_thickness } => {
                smallvec![("Height", *height), ("Width", *width), ("WallThickness", *wall_thickness)]
            }
            SectionParameters::CircularHollow { diameter, wall_thickness } => {
                smallvec![("Diameter", *diameter), ("WallThickness", *wall_thickness)]
            }
            SectionParameters::Custom { values } => {
                values.iter().map(|(k, v)| (k.as_str(), *v)).collect()
            }
        }
    }
}
