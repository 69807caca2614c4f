//! Key-indexed object registry for the implementations of an abstract type.
//!
//! A registry (a "factory") maps unique keys to creation policies for one
//! abstract type. The source unit defining a concrete implementation registers
//! it under a key at file scope, without any central list of implementations;
//! consumer code instantiates the right concrete type purely by supplying the
//! key. New implementations can be added without touching or recompiling the
//! code that consumes them.
//!
//! # Example
//!
//! ```
//! use object_registry::{declare_registry, register_object};
//!
//! trait FormatHandler {
//! 	fn format(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct JsonHandler;
//!
//! impl FormatHandler for JsonHandler {
//! 	fn format(&self) -> &'static str {
//! 		"json"
//! 	}
//! }
//!
//! declare_registry!(FormatHandlers: dyn FormatHandler);
//! register_object!(FormatHandlers, JsonHandler, "json");
//!
//! let handler = FormatHandlers::registry().create("json")?;
//! assert_eq!(handler.format(), "json");
//! # Ok::<(), object_registry::RegistryError>(())
//! ```

mod creation;
mod global;
mod registration;
mod registry;

pub use creation::{Constructible, Creator};
pub use registration::{Factory, Registration};
pub use registry::Registry;

/// Re-exported for the expansion of [`declare_registry!`] and
/// [`register_object!`].
pub use inventory;

use thiserror::Error;

/// Errors that can occur during registry lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// No creator is registered under the requested key.
	#[error("factory key `{0}` not found")]
	KeyNotFound(String),
}
