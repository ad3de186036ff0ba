// enumgen - enum definitions for several languages from one set of declaration files

pub mod config;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod parser;
pub mod tooling;
pub mod validator;

pub use diagnostic::{Diagnostic, DiagnosticKind, Reporter, RunStatus, Severity};
pub use emit::Target;
pub use error::{EnumgenError, Result};
