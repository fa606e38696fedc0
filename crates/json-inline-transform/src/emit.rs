//! Replacement syntax: a small statement/expression/type AST and its printer.
//!
//! The printer writes everything for one replaced import on a single line so
//! line numbers in the rest of the file stay put.

use std::fmt::{self, Display, Formatter, Write as _};

/// A value-producing expression built from JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    String(String),
    /// Numeric literal, already in its printed form.
    Number(String),
    Boolean(bool),
    Null,
    Undefined,
    Array(Vec<Expr>),
    /// Object literal; keys are always printed as quoted strings.
    Object(Vec<(String, Expr)>),
}

/// A structural type built from JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    String,
    Number,
    /// `true` or `false`, never the general `boolean`.
    BooleanLiteral(bool),
    Null,
    Undefined,
    /// Fixed-length tuple, one element type per position.
    Tuple(Vec<TsType>),
    /// Type literal; keys are always printed as quoted strings.
    Literal(Vec<(String, TsType)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `const`
    Const,
    /// `declare var`
    DeclareVar,
    /// `var`, for bodies that are already ambient (`declare module "x" { .. }`)
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub type_annotation: Option<TsType>,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableStatement {
    pub exported: bool,
    pub kind: DeclarationKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Variable(VariableStatement),
    /// `export default <expr>;`
    ExportDefault(Expr),
    /// `export default <name>;`
    ExportDefaultName(String),
    /// `export { a, b as c };`
    ExportNames(Vec<ExportSpecifier>),
}

/// One entry of an `export { .. }` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::String(s) => write_quoted(f, s),
            Expr::Number(n) => f.write_str(n),
            Expr::Boolean(b) => write!(f, "{b}"),
            Expr::Null => f.write_str("null"),
            Expr::Undefined => f.write_str("undefined"),
            Expr::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Expr::Object(props) => {
                if props.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in props.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    // A plain `"__proto__": v` sets the prototype instead.
                    if key == "__proto__" {
                        f.write_char('[')?;
                        write_quoted(f, key)?;
                        f.write_char(']')?;
                    } else {
                        write_quoted(f, key)?;
                    }
                    write!(f, ": {value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl Display for TsType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TsType::String => f.write_str("string"),
            TsType::Number => f.write_str("number"),
            TsType::BooleanLiteral(b) => write!(f, "{b}"),
            TsType::Null => f.write_str("null"),
            TsType::Undefined => f.write_str("undefined"),
            TsType::Tuple(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            TsType::Literal(members) => {
                if members.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (key, ty) in members {
                    write_quoted(f, key)?;
                    write!(f, ": {ty}; ")?;
                }
                f.write_char('}')
            }
        }
    }
}

impl Display for Declarator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {ty}")?;
        }
        if let Some(init) = &self.init {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

impl Display for VariableStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.exported {
            f.write_str("export ")?;
        }
        match self.kind {
            DeclarationKind::Const => f.write_str("const ")?,
            DeclarationKind::DeclareVar => f.write_str("declare var ")?,
            DeclarationKind::Var => f.write_str("var ")?,
        }
        for (i, decl) in self.declarators.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{decl}")?;
        }
        f.write_char(';')
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Variable(var) => write!(f, "{var}"),
            Statement::ExportDefault(expr) => write!(f, "export default {expr};"),
            Statement::ExportDefaultName(name) => write!(f, "export default {name};"),
            Statement::ExportNames(specifiers) => {
                f.write_str("export { ")?;
                for (i, spec) in specifiers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if spec.local == spec.exported {
                        f.write_str(&spec.local)?;
                    } else {
                        write!(f, "{} as {}", spec.local, spec.exported)?;
                    }
                }
                f.write_str(" };")
            }
        }
    }
}

/// Print a run of statements on one line, separated by single spaces.
pub fn render(statements: &[Statement]) -> String {
    let mut out = String::new();
    for (i, stmt) in statements.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{stmt}");
    }
    out
}

/// Double-quoted string literal valid in both JS and TS source.
fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{2028}' => f.write_str("\\u2028")?,
            '\u{2029}' => f.write_str("\\u2029")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Reserved words plus the names strict-mode code may not bind.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `name` can be used as a declared binding name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first == '$' || first.is_alphabetic()) {
        return false;
    }
    if !chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric()) {
        return false;
    }
    !RESERVED_WORDS.contains(&name)
}
