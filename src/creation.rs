//! Creation policies for registered implementations.
//!
//! A creation policy is the nullary function a registry stores for each key:
//! it allocates a fresh instance of one concrete type and hands it out upcast
//! to the abstract type the registry produces.

/// Nullary creator function stored in a registry.
///
/// Creators are plain function pointers, so no per-call state can be threaded
/// through a creation. Ownership of the produced instance passes to the
/// caller; the registry never retains it.
pub type Creator<T> = fn() -> Box<T>;

/// Creation policy tying a concrete type to the abstract type `T` a registry
/// produces.
///
/// Trait objects cannot be upcast generically on stable Rust, so a concrete
/// type spells the coercion out once:
///
/// ```
/// use object_registry::Constructible;
///
/// trait FormatHandler {}
///
/// #[derive(Default)]
/// struct JsonHandler;
///
/// impl FormatHandler for JsonHandler {}
///
/// impl Constructible<dyn FormatHandler> for JsonHandler {
/// 	fn construct() -> Box<dyn FormatHandler> {
/// 		Box::new(JsonHandler::default())
/// 	}
/// }
/// ```
///
/// The [`register_object!`](crate::register_object) macro performs the same
/// coercion inline and does not require this trait.
pub trait Constructible<T: ?Sized>: 'static {
	/// Allocates a fresh instance, ownership transferred to the caller.
	///
	/// Construction must have no side effects beyond the allocation itself.
	fn construct() -> Box<T>;
}

/// Every sized `Default` type is its own creation policy.
impl<T: Default + 'static> Constructible<T> for T {
	fn construct() -> Box<T> {
		Box::new(T::default())
	}
}
