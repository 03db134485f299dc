use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum FunctionCategory {
    #[strum(to_string = "Basic")]
    Basic,
    #[strum(to_string = "Trig")]
    Trigonometric,
    #[strum(to_string = "Inv Trig")]
    InverseTrigonometric,
    #[strum(to_string = "Hyperbolic")]
    Hyperbolic,
    #[strum(to_string = "Inv Hyper")]
    InverseHyperbolic,
    #[strum(to_string = "Statistics")]
    Statistics,
    #[strum(to_string = "Probability")]
    Probability,
    #[strum(to_string = "Calculus")]
    Calculus,
    #[strum(to_string = "Linear Alg")]
    LinearAlgebra,
    #[strum(to_string = "Special")]
    Special,
    #[strum(to_string = "List Ops")]
    ListOperations,
}

impl FunctionCategory {
    pub const fn functions(self) -> &'static [&'static str] {
        match self {
            FunctionCategory::Basic => &["log", "ln", "exp", "sqrt"],
            FunctionCategory::Trigonometric => &["sin", "cos", "tan", "sec", "csc", "cot"],
            FunctionCategory::InverseTrigonometric => {
                &["arcsin", "arccos", "arctan", "arcsec", "arccsc", "arccot"]
            }
            FunctionCategory::Hyperbolic => &["sinh", "cosh", "tanh", "sech", "csch", "coth"],
            FunctionCategory::InverseHyperbolic => &["arsinh", "arcosh", "artanh"],
            FunctionCategory::Statistics => &[
                "mean", "median", "mode", "std", "var", "min", "max", "sum", "prod",
            ],
            FunctionCategory::Probability => {
                &["binom", "poisson", "normal", "gamma", "beta", "chi2"]
            }
            FunctionCategory::Calculus => &["diff", "integral", "lim", "limsup", "liminf"],
            FunctionCategory::LinearAlgebra => &[
                "det",
                "trace",
                "rank",
                "eigenval",
                "eigenvec",
                "transpose",
                "inverse",
            ],
            FunctionCategory::Special => &["erf", "erfc", "gamma", "beta", "zeta", "bessel"],
            FunctionCategory::ListOperations => {
                &["length", "first", "last", "nth", "append", "concat"]
            }
        }
    }

    /// Short label shown on the category tab.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Every vocabulary entry in table order. Names listed under more than one
/// category (`gamma`, `beta`) appear once per category.
pub fn functions() -> impl Iterator<Item = (FunctionCategory, &'static str)> {
    FunctionCategory::iter().flat_map(|category| {
        category
            .functions()
            .iter()
            .map(move |&name| (category, name))
    })
}

pub fn category_of(name: &str) -> Option<FunctionCategory> {
    functions().find(|&(_, n)| n == name).map(|(c, _)| c)
}

pub fn is_function(name: &str) -> bool {
    category_of(name).is_some()
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Finds the function name that `input` starts with. A name only counts when
/// it is not immediately followed by another identifier character, so `sin`
/// never matches the start of `sinh` or `sinx`.
pub fn match_function(input: &str) -> Option<&'static str> {
    functions().map(|(_, name)| name).find(|name| {
        input.starts_with(name)
            && !input[name.len()..]
                .chars()
                .next()
                .is_some_and(is_identifier_char)
    })
}
