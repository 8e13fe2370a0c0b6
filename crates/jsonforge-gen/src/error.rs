use jsonforge_schema::{ClassId, ResolveError};
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// GenError
///
/// Generation-time hard errors. Every variant aborts the whole generation
/// run; none of these are recoverable by the caller, they indicate a schema
/// or configuration mistake that must be fixed before artifacts exist.
///

#[derive(Debug, ThisError)]
pub enum GenError {
    /// A class re-entered itself during emission without a depth bound on
    /// the recursive property. Emitting code for it would never terminate.
    #[error("recursion detected for {class} at {path}; declare a max depth on the recursive property to bound it")]
    UnboundedRecursion { class: ClassId, path: String },

    /// Serializing needs a getter or a public field. Silently dropping the
    /// property would change the wire format, so this is fatal.
    #[error("property {path} is not public and no getter has been defined (class stack: {stack})")]
    InaccessibleProperty { path: String, stack: String },

    #[error(
        "cannot generate a deserializer for root class {class}: its constructor takes arguments, \
         which is only supported for nested classes"
    )]
    RootClassConstructor { class: ClassId },

    #[error(
        "unknown constructor argument \"{argument}\" on {class}; the properties only describe: {known}{ambiguity}"
    )]
    UnresolvedConstructorArgument {
        class: ClassId,
        argument: String,
        known: String,
        ambiguity: String,
    },

    #[error("unsupported default value for constructor argument \"{argument}\" on {class}")]
    UnsupportedDefault { class: ClassId, argument: String },

    /// Encoding a date-time with a declared zone is an explicitly
    /// unimplemented case; decoding with one is supported.
    #[error("timezone support is not implemented when serializing date-time properties ({path})")]
    SerializeTimezone { path: String },

    #[error(
        "array element type at {path} is unknown; enable generic arrays in the configuration to \
         copy such values through verbatim"
    )]
    GenericArraysDisabled { path: String },

    #[error("unexpected array element type ({kind}) at {path}")]
    UnsupportedArrayElement { kind: &'static str, path: String },

    #[error("invalid class path \"{class}\": {message}")]
    InvalidClassPath { class: ClassId, message: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
