//! Static self-registration of concrete implementations.
//!
//! Rust has no guaranteed pre-`main` initialization order, so registration
//! helpers are not run as global constructors. Instead they are collected
//! through `inventory` and applied to the process-wide registry exactly once,
//! on its first access, which still guarantees that every static registration
//! is visible before any key is looked up.

use crate::{Constructible, Creator, Registry};

/// A single pending registration: one key bound to one creation policy.
///
/// A registration's only effect is to [`apply`](Registration::apply) itself
/// to a registry; it holds no further state. Values submitted through
/// [`register_object!`](crate::register_object) are applied automatically by
/// the factory's registry accessor.
pub struct Registration<T: ?Sized + 'static> {
	key: &'static str,
	creator: Creator<T>,
}

impl<T: ?Sized + 'static> Registration<T> {
	/// Binds `creator` to `key`.
	pub const fn new(key: &'static str, creator: Creator<T>) -> Self {
		Self { key, creator }
	}

	/// Binds the creation policy of the concrete type `C` to `key`.
	pub fn of<C>(key: &'static str) -> Self
	where
		C: Constructible<T>,
	{
		Self {
			key,
			creator: C::construct,
		}
	}

	/// The key this registration claims.
	pub fn key(&self) -> &'static str {
		self.key
	}

	/// The creation policy this registration carries.
	pub fn creator(&self) -> Creator<T> {
		self.creator
	}

	/// Performs the registration against `registry`.
	pub fn apply(&self, registry: &Registry<String, T>) {
		registry.register(self.key.to_string(), self.creator);
	}
}

/// Implemented by the factory types [`declare_registry!`](crate::declare_registry)
/// generates.
///
/// A factory type names one registry: it carries the abstract type the
/// registry produces and wraps the registrations collected for it, so that
/// each declared registry gets its own `inventory` collection.
pub trait Factory: Sized + 'static {
	/// The abstract type instances of this factory produce.
	type Abstract: ?Sized + 'static;

	/// Wraps one registration for collection.
	fn entry(registration: Registration<Self::Abstract>) -> Self;

	/// The wrapped registration.
	fn registration(&self) -> &Registration<Self::Abstract>;
}

impl<T> Registry<String, T>
where
	T: ?Sized + 'static,
{
	/// Returns the process-wide registry with every static registration
	/// collected for the factory `F` applied.
	///
	/// Registrations are applied exactly once, on the first call; later calls
	/// and concurrent first calls observe the fully seeded registry. Direct
	/// calls to [`Registry::register`] remain available afterwards for
	/// dynamic or late registration.
	pub fn global<F>() -> &'static Self
	where
		F: Factory<Abstract = T> + inventory::Collect,
	{
		let registry = Self::instance();
		registry.seed(|| {
			for entry in inventory::iter::<F> {
				let registration = entry.registration();
				tracing::debug!("Registering implementation: {}", registration.key());
				registration.apply(registry);
			}
		});
		registry
	}
}

/// Declares a named registry producing the given abstract type.
///
/// Invoked once, next to the abstract trait definition. Generates a factory
/// type whose `registry()` accessor returns the process-wide
/// [`Registry`](crate::Registry) seeded with every
/// [`register_object!`](crate::register_object) submission for it:
///
/// ```
/// use object_registry::declare_registry;
///
/// pub trait FormatHandler {}
///
/// declare_registry!(pub FormatHandlers: dyn FormatHandler);
///
/// assert!(!FormatHandlers::registry().is_registered("json"));
/// ```
#[macro_export]
macro_rules! declare_registry {
	($(#[$meta:meta])* $vis:vis $name:ident: $abstract:ty) => {
		$(#[$meta])*
		$vis struct $name($crate::Registration<$abstract>);

		impl $crate::Factory for $name {
			type Abstract = $abstract;

			fn entry(registration: $crate::Registration<$abstract>) -> Self {
				Self(registration)
			}

			fn registration(&self) -> &$crate::Registration<$abstract> {
				&self.0
			}
		}

		impl $name {
			/// Process-wide registry, seeded with every registration
			/// submitted for this factory.
			$vis fn registry() -> &'static $crate::Registry<::std::string::String, $abstract> {
				$crate::Registry::global::<$name>()
			}
		}

		$crate::inventory::collect!($name);
	};
}

/// Registers a concrete type in a declared registry under the given key.
///
/// Used at file scope in the source unit defining the concrete type; no other
/// code has to know about the registration. The concrete type must implement
/// `Default`, which is what the stored creation policy calls:
///
/// ```
/// use object_registry::{declare_registry, register_object};
///
/// trait FormatHandler {}
///
/// #[derive(Default)]
/// struct JsonHandler;
///
/// impl FormatHandler for JsonHandler {}
///
/// declare_registry!(FormatHandlers: dyn FormatHandler);
/// register_object!(FormatHandlers, JsonHandler, "json");
///
/// assert!(FormatHandlers::registry().is_registered("json"));
/// ```
#[macro_export]
macro_rules! register_object {
	($factory:path, $concrete:ty, $key:expr) => {
		$crate::inventory::submit! {
			$factory($crate::Registration::new(
				$key,
				|| -> ::std::boxed::Box<<$factory as $crate::Factory>::Abstract> {
					::std::boxed::Box::new(<$concrete as ::std::default::Default>::default())
				},
			))
		}
	};
}
