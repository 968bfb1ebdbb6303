//! Scalar functions of the fields at an evaluation point.
//!
//! A field-function list is a comma-separated string such as
//! `"Ex,Ey,Ez,Hx,Hy,Hz"`. Each token is turned into a [`FieldFunction`] by
//! a [`FieldFunctionParser`]; the default parser, [`StandardFieldFunctions`],
//! recognises a fixed vocabulary of names. Richer expression languages plug
//! in through the parser trait.

use num_complex::Complex64;

use crate::engine::FieldError;
use crate::types::SixVector;

/// Function list used when the caller does not specify one.
pub const DEFAULT_FUNCTIONS: &str = "Ex,Ey,Ez,Hx,Hy,Hz";

/// A scalar function of position, surface normal, fields, and medium.
pub trait FieldFunction: Send + Sync {
    fn name(&self) -> &str;

    fn eval(
        &self,
        x: &[f64; 3],
        normal: &[f64; 3],
        eh: &SixVector,
        eps: Complex64,
        mu: Complex64,
    ) -> Complex64;
}

/// Turns a single function name into an evaluator.
pub trait FieldFunctionParser: Send + Sync {
    fn parse(&self, token: &str) -> Result<Box<dyn FieldFunction>, FieldError>;
}

/// Split `list` on commas and parse every token.
pub fn parse_function_list(
    parser: &dyn FieldFunctionParser,
    list: &str,
) -> Result<Vec<Box<dyn FieldFunction>>, FieldError> {
    list.split(',').map(|token| parser.parse(token.trim())).collect()
}

/// Parser for the built-in function names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFieldFunctions;

impl StandardFieldFunctions {
    /// Every name this parser accepts.
    pub const NAMES: [&'static str; 13] = [
        "Ex", "Ey", "Ez", "Hx", "Hy", "Hz", "|E|^2", "|H|^2", "Sx", "Sy", "Sz", "Eps", "Mu",
    ];
}

impl FieldFunctionParser for StandardFieldFunctions {
    fn parse(&self, token: &str) -> Result<Box<dyn FieldFunction>, FieldError> {
        let kind = match token {
            "Ex" => Kind::Component(0),
            "Ey" => Kind::Component(1),
            "Ez" => Kind::Component(2),
            "Hx" => Kind::Component(3),
            "Hy" => Kind::Component(4),
            "Hz" => Kind::Component(5),
            "|E|^2" => Kind::NormSquared(0),
            "|H|^2" => Kind::NormSquared(3),
            "Sx" => Kind::Poynting(0),
            "Sy" => Kind::Poynting(1),
            "Sz" => Kind::Poynting(2),
            "Eps" => Kind::Eps,
            "Mu" => Kind::Mu,
            _ => return Err(FieldError::UnknownFieldFunction(token.to_string())),
        };
        Ok(Box::new(StandardFunction {
            name: token.to_string(),
            kind,
        }))
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Component(usize),
    /// Squared norm of the 3-vector starting at this index.
    NormSquared(usize),
    /// Component of the time-averaged Poynting vector ½ Re(E × H*).
    Poynting(usize),
    Eps,
    Mu,
}

#[derive(Debug, Clone)]
struct StandardFunction {
    name: String,
    kind: Kind,
}

impl FieldFunction for StandardFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn eval(
        &self,
        _x: &[f64; 3],
        _normal: &[f64; 3],
        eh: &SixVector,
        eps: Complex64,
        mu: Complex64,
    ) -> Complex64 {
        match self.kind {
            Kind::Component(i) => eh[i],
            Kind::NormSquared(i) => {
                Complex64::new(eh[i].norm_sqr() + eh[i + 1].norm_sqr() + eh[i + 2].norm_sqr(), 0.0)
            }
            Kind::Poynting(i) => {
                let (j, k) = ((i + 1) % 3, (i + 2) % 3);
                let s = eh[j] * eh[3 + k].conj() - eh[k] * eh[3 + j].conj();
                Complex64::new(0.5 * s.re, 0.0)
            }
            Kind::Eps => eps,
            Kind::Mu => mu,
        }
    }
}
