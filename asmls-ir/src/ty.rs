use std::fmt;

/// Type tag carried by every IR value.
///
/// The type system at this layer is nominal only: it labels values for
/// display and for downstream consumers, it is not enforced across
/// replacements.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LiteralType {
    Void,
    Int,
    UInt,
    String,
}

impl LiteralType {
    pub fn to_str(&self) -> &'static str {
        match *self {
            LiteralType::Void => "void",
            LiteralType::Int => "int",
            LiteralType::UInt => "uint",
            LiteralType::String => "string",
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
