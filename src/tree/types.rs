//! Type signatures as produced by the upstream parser.
//!
//! A signature is a base type name plus cv/ref/pointer decorations and an
//! optional list of template arguments, which may themselves be types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (possibly templated) type as written at a declaration site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSignature {
    /// Base type name, possibly qualified (`std::vector`, `::Foo`, `int`)
    pub base_type: String,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_mutable: bool,
    pub is_pointer: bool,
    pub is_lvalue_ref: bool,
    pub is_rvalue_ref: bool,
    /// Template arguments in declaration order
    pub template_args: Vec<TemplateArgument>,
}

impl TypeSignature {
    /// A plain, undecorated type
    pub fn named(base_type: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
            ..Self::default()
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_pointer(mut self) -> Self {
        self.is_pointer = true;
        self
    }

    pub fn with_lvalue_ref(mut self) -> Self {
        self.is_lvalue_ref = true;
        self
    }

    /// Append a type template argument
    pub fn with_type_arg(mut self, arg: TypeSignature) -> Self {
        self.template_args.push(TemplateArgument::Type(arg));
        self
    }

    /// Append a non-type template argument (`4`, `N + 1`)
    pub fn with_value_arg(mut self, value: impl Into<String>) -> Self {
        self.template_args.push(TemplateArgument::Value(value.into()));
        self
    }

    /// Every base type name mentioned by this signature, outermost first.
    pub fn type_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_type_names(&mut out);
        out
    }

    fn collect_type_names<'s>(&'s self, out: &mut Vec<&'s str>) {
        if !self.base_type.is_empty() {
            out.push(&self.base_type);
        }
        for arg in &self.template_args {
            if let TemplateArgument::Type(ts) = arg {
                ts.collect_type_names(out);
            }
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mutable {
            write!(f, "mutable ")?;
        }
        if self.is_volatile {
            write!(f, "volatile ")?;
        }
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}", self.base_type)?;
        if self.is_pointer {
            write!(f, "*")?;
        }
        if self.is_lvalue_ref {
            write!(f, "&")?;
        }
        if self.is_rvalue_ref {
            write!(f, "&&")?;
        }
        if !self.template_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.template_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// One argument of a template argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateArgument {
    /// A keyword argument such as `typename`
    Keyword(String),
    /// A type argument
    Type(TypeSignature),
    /// A non-type (value) argument
    Value(String),
}

impl fmt::Display for TemplateArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArgument::Keyword(k) => write!(f, "{}", k),
            TemplateArgument::Type(ts) => write!(f, "{}", ts),
            TemplateArgument::Value(v) => write!(f, "{}", v),
        }
    }
}

/// A function, constructor or operator parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub type_signature: TypeSignature,
    pub name: String,
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(type_signature: TypeSignature, name: impl Into<String>) -> Self {
        Self {
            type_signature,
            name: name.into(),
            default_value: None,
        }
    }
}

/// Render a parameter list as `(T1, T2)`.
///
/// Only parameter types participate; names and defaults do not, so two
/// declarations of the same overload render identically.
pub fn render_signature(params: &[Parameter]) -> String {
    let types: Vec<String> = params.iter().map(|p| p.type_signature.to_string()).collect();
    format!("({})", types.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_decorations() {
        let ts = TypeSignature::named("Vec").with_const().with_lvalue_ref();
        assert_eq!(ts.to_string(), "const Vec&");

        let ptr = TypeSignature::named("char").with_pointer();
        assert_eq!(ptr.to_string(), "char*");
    }

    #[test]
    fn test_display_template_args() {
        let ts = TypeSignature::named("std::array")
            .with_type_arg(TypeSignature::named("Foo"))
            .with_value_arg("4");
        assert_eq!(ts.to_string(), "std::array<Foo, 4>");
    }

    #[test]
    fn test_type_names_recurse_into_arguments() {
        let ts = TypeSignature::named("std::map")
            .with_type_arg(TypeSignature::named("Key"))
            .with_type_arg(TypeSignature::named("std::vector").with_type_arg(TypeSignature::named("Value")))
            .with_value_arg("8");

        assert_eq!(ts.type_names(), vec!["std::map", "Key", "std::vector", "Value"]);
    }

    #[test]
    fn test_render_signature_ignores_names() {
        let params = vec![
            Parameter::new(TypeSignature::named("int"), "x"),
            Parameter::new(TypeSignature::named("Foo").with_const().with_lvalue_ref(), "other"),
        ];
        assert_eq!(render_signature(&params), "(int, const Foo&)");
        assert_eq!(render_signature(&[]), "()");
    }
}
