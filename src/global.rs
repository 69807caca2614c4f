//! Process-wide registry singletons.
//!
//! Each distinct `(K, T)` pairing owns exactly one registry for the lifetime
//! of the process. Instances are created lazily on first access, kept in a
//! table keyed by their type id, and leaked so they can be handed out as
//! `&'static` references.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::Registry;

static REGISTRIES: OnceLock<Mutex<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>> =
	OnceLock::new();

impl<K, T> Registry<K, T>
where
	K: Eq + Hash + Send + Sync + 'static,
	T: ?Sized + 'static,
{
	/// Returns the process-wide registry for this `(K, T)` pairing.
	///
	/// The registry is constructed exactly once, on first access, and the
	/// same instance is returned for the rest of the process lifetime. Safe
	/// to call from any thread, before or after static registrations have
	/// been applied.
	pub fn instance() -> &'static Self {
		let mut registries = REGISTRIES
			.get_or_init(|| Mutex::new(HashMap::new()))
			.lock()
			.unwrap_or_else(PoisonError::into_inner);
		let registry: &'static (dyn Any + Send + Sync) = *registries
			.entry(TypeId::of::<Self>())
			.or_insert_with(|| {
				let leaked: &'static Self = Box::leak(Box::new(Self::new()));
				leaked
			});
		registry
			.downcast_ref::<Self>()
			.expect("singleton table entry is keyed by its own type id")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	trait Marker {}
	trait OtherMarker {}

	#[test]
	fn test_instance_returns_the_same_registry() {
		let first = Registry::<String, dyn Marker>::instance();
		let second = Registry::<String, dyn Marker>::instance();
		assert!(std::ptr::eq(first, second));
	}

	#[test]
	fn test_instance_is_shared_across_threads() {
		let local = Registry::<String, dyn Marker>::instance() as *const _ as usize;
		let handles: Vec<_> = (0..8)
			.map(|_| {
				std::thread::spawn(|| {
					Registry::<String, dyn Marker>::instance() as *const _ as usize
				})
			})
			.collect();
		for handle in handles {
			assert_eq!(handle.join().unwrap(), local);
		}
	}

	#[test]
	fn test_distinct_pairings_use_distinct_registries() {
		let strings = Registry::<String, dyn Marker>::instance() as *const _ as usize;
		let numbers = Registry::<u32, dyn Marker>::instance() as *const _ as usize;
		let other = Registry::<String, dyn OtherMarker>::instance() as *const _ as usize;
		assert_ne!(strings, numbers);
		assert_ne!(strings, other);
	}

	#[test]
	fn test_instance_accepts_registrations_after_creation() {
		trait Late {
			fn kind(&self) -> &'static str;
		}

		struct LateImpl;

		impl Late for LateImpl {
			fn kind(&self) -> &'static str {
				"late"
			}
		}

		fn late() -> Box<dyn Late> {
			Box::new(LateImpl)
		}

		let registry = Registry::<String, dyn Late>::instance();
		assert!(!registry.is_registered("late"));
		registry.register("late".to_string(), late);
		assert_eq!(registry.create("late").unwrap().kind(), "late");
	}
}
