//! Access-path builders for the two address spaces the generated code moves
//! values between: the decoded JSON tree and the model object graph.
//!
//! Paths are immutable values; every `with_*` step returns a new path, so a
//! caller can hand the same base path to several sibling emissions without
//! them observing each other. Rendering produces the access expression
//! tokens; `render()` produces the textual form used for error messages and
//! for deriving loop/temp variable names.

use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, format_ident, quote};

///
/// ArrayPath
///
/// A path into the decoded JSON value, e.g. `json_data["items"][index16]`.
///

#[derive(Clone, Debug)]
pub struct ArrayPath {
    root: Ident,
    steps: Vec<ArrayStep>,
}

#[derive(Clone, Debug)]
enum ArrayStep {
    /// String-literal keyed access: `["wire_name"]`.
    Field(String),
    /// Computed sequential access: `[index16]`.
    Index(Ident),
    /// Computed string-keyed access: `[key16.as_str()]`.
    Key(Ident),
}

impl ArrayPath {
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: format_ident!("{root}"),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field_name(&self, name: &str) -> Self {
        let mut clone = self.clone();
        clone.steps.push(ArrayStep::Field(name.to_string()));
        clone
    }

    #[must_use]
    pub fn with_index(&self, index: &Ident) -> Self {
        let mut clone = self.clone();
        clone.steps.push(ArrayStep::Index(index.clone()));
        clone
    }

    #[must_use]
    pub fn with_key(&self, key: &Ident) -> Self {
        let mut clone = self.clone();
        clone.steps.push(ArrayStep::Key(key.clone()));
        clone
    }

    /// Textual form, e.g. `json_data["a"][index12]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.root.to_string();
        for step in &self.steps {
            match step {
                ArrayStep::Field(name) => out.push_str(&format!("[\"{name}\"]")),
                ArrayStep::Index(var) | ArrayStep::Key(var) => out.push_str(&format!("[{var}]")),
            }
        }
        out
    }
}

impl ToTokens for ArrayPath {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let root = &self.root;
        tokens.extend(quote!(#root));
        for step in &self.steps {
            match step {
                ArrayStep::Field(name) => tokens.extend(quote!([#name])),
                ArrayStep::Index(var) => tokens.extend(quote!([#var])),
                ArrayStep::Key(var) => tokens.extend(quote!([#var.as_str()])),
            }
        }
    }
}

///
/// ModelPath
///
/// A path into the in-memory model, e.g. `model.items[index16].label`.
///

#[derive(Clone, Debug)]
pub struct ModelPath {
    root: Ident,
    steps: Vec<ModelStep>,
}

#[derive(Clone, Debug)]
enum ModelStep {
    /// Named property access: `.label`.
    Property(Ident),
    /// Sequential element access: `[index16]`.
    Index(Ident),
    /// Map element access: `[&key16]`.
    Key(Ident),
}

impl ModelPath {
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: format_ident!("{root}"),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_variable(root: Ident) -> Self {
        Self {
            root,
            steps: Vec::new(),
        }
    }

    /// A fresh variable name derived from arbitrary path fragments. Every
    /// run of non-alphanumeric characters collapses to one `_`, so distinct
    /// nesting positions yield distinct, stable identifiers.
    #[must_use]
    pub fn temp_variable(fragments: &[&str]) -> Ident {
        let mut parts: Vec<String> = Vec::new();

        for fragment in fragments {
            let mut clean = String::new();
            let mut pending_separator = false;
            for c in fragment.chars() {
                if c.is_ascii_alphanumeric() {
                    if pending_separator && !clean.is_empty() {
                        clean.push('_');
                    }
                    pending_separator = false;
                    clean.push(c);
                } else {
                    pending_separator = true;
                }
            }
            if !clean.is_empty() {
                parts.push(clean);
            }
        }

        format_ident!("{}", parts.join("_"))
    }

    /// Loop index variable scoped to a path: the name embeds the rendered
    /// path length, which grows strictly with nesting depth, so nested loops
    /// never shadow each other without needing a global counter.
    #[must_use]
    pub fn index_variable(path: &str) -> Ident {
        format_ident!("index{}", path.len())
    }

    /// Map-key counterpart of [`Self::index_variable`].
    #[must_use]
    pub fn key_variable(path: &str) -> Ident {
        format_ident!("key{}", path.len())
    }

    #[must_use]
    pub fn with_property(&self, name: &str) -> Self {
        let mut clone = self.clone();
        clone.steps.push(ModelStep::Property(format_ident!("{name}")));
        clone
    }

    #[must_use]
    pub fn with_index(&self, index: &Ident) -> Self {
        let mut clone = self.clone();
        clone.steps.push(ModelStep::Index(index.clone()));
        clone
    }

    #[must_use]
    pub fn with_key(&self, key: &Ident) -> Self {
        let mut clone = self.clone();
        clone.steps.push(ModelStep::Key(key.clone()));
        clone
    }

    /// Textual form, e.g. `model.items[index12]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.root.to_string();
        for step in &self.steps {
            match step {
                ModelStep::Property(name) => out.push_str(&format!(".{name}")),
                ModelStep::Index(var) | ModelStep::Key(var) => out.push_str(&format!("[{var}]")),
            }
        }
        out
    }
}

impl ToTokens for ModelPath {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let root = &self.root;
        tokens.extend(quote!(#root));
        for step in &self.steps {
            match step {
                ModelStep::Property(name) => tokens.extend(quote!(.#name)),
                ModelStep::Index(var) => tokens.extend(quote!([#var])),
                ModelStep::Key(var) => tokens.extend(quote!([&#var])),
            }
        }
    }
}
