use std::fmt;

/// The declared type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Bool,
    String,
    Int,
    Float,
    /// A positional slot that absorbs every remaining token once reached.
    PositionalSlice,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::PositionalSlice => "positional-slice",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete option value. The variant doubles as the option's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Float(f64),
    Strings(Vec<String>),
}

impl Value {
    /// The zero value of `ty`.
    pub fn zero(ty: VarType) -> Self {
        match ty {
            VarType::Bool => Self::Bool(false),
            VarType::String => Self::String(String::new()),
            VarType::Int => Self::Int(0),
            VarType::Float => Self::Float(0.0),
            VarType::PositionalSlice => Self::Strings(Vec::new()),
        }
    }

    pub fn var_type(&self) -> VarType {
        match self {
            Self::Bool(_) => VarType::Bool,
            Self::String(_) => VarType::String,
            Self::Int(_) => VarType::Int,
            Self::Float(_) => VarType::Float,
            Self::Strings(_) => VarType::PositionalSlice,
        }
    }

    /// Whether this is the zero value of its type.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::String(s) => s.is_empty(),
            Self::Int(n) => *n == 0,
            Self::Float(x) => *x == 0.0,
            Self::Strings(v) => v.is_empty(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::Strings(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Strings(v) => f.write_str(&v.join(" ")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::Strings(v)
    }
}

/// Decode a truthy/falsy token, case-insensitively.
///
/// Truthy: `true`, `yes`, `on`, `1`, `t`. Falsy: `false`, `no`, `off`, `0`, `f`.
/// Anything else is neither and yields `None`.
pub fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "t" => Some(true),
        "false" | "no" | "off" | "0" | "f" => Some(false),
        _ => None,
    }
}
