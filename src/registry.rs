//! The key to creator mapping and its lookup operations.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Once, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Constructible, Creator, RegistryError};

/// A registry of creators for the abstract type `T`, indexed by keys of
/// type `K`.
///
/// Each key names at most one creator; registrations are never removed, so a
/// registry only ever grows. Lookups and registrations are internally
/// synchronized, which keeps late registration safe even while other threads
/// are already creating instances.
///
/// A registry is an ordinary value and can be constructed with [`Registry::new`]
/// for tests or scoped use. The process-wide instance for a given `(K, T)`
/// pairing is reached through [`Registry::instance`].
pub struct Registry<K, T: ?Sized> {
	creators: RwLock<HashMap<K, Creator<T>>>,
	seeded: Once,
}

impl<K, T: ?Sized> Registry<K, T> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			creators: RwLock::new(HashMap::new()),
			seeded: Once::new(),
		}
	}

	/// Runs `populate` exactly once for this registry, used to apply the
	/// statically collected registrations on first access.
	pub(crate) fn seed(&self, populate: impl FnOnce()) {
		self.seeded.call_once(populate);
	}

	fn read(&self) -> RwLockReadGuard<'_, HashMap<K, Creator<T>>> {
		// No operation panics while the map is mid-update, so a poisoned
		// lock is still consistent; recover the guard.
		self.creators.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, Creator<T>>> {
		self.creators
			.write()
			.unwrap_or_else(PoisonError::into_inner)
	}
}

impl<K, T: ?Sized> Default for Registry<K, T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, T> Registry<K, T>
where
	K: Eq + Hash + Display,
	T: ?Sized,
{
	/// Registers `creator` under `key`.
	///
	/// The first registration for a key wins: registering an already present
	/// key is a silent no-op, so an accidental duplicate static registration
	/// cannot overwrite an earlier one. The ignored duplicate is reported
	/// through a debug event to keep unintentional collisions diagnosable.
	pub fn register(&self, key: K, creator: Creator<T>) {
		match self.write().entry(key) {
			Entry::Occupied(existing) => {
				tracing::debug!("Ignoring duplicate registration for key: {}", existing.key());
			}
			Entry::Vacant(slot) => {
				slot.insert(creator);
			}
		}
	}

	/// Registers the creation policy of the concrete type `C` under `key`.
	pub fn register_type<C>(&self, key: K)
	where
		C: Constructible<T>,
	{
		self.register(key, C::construct);
	}

	/// Creates a fresh instance of the implementation registered under `key`.
	///
	/// Ownership of the instance passes to the caller. Fails with
	/// [`RegistryError::KeyNotFound`] when no creator is registered under the
	/// key.
	pub fn create<Q>(&self, key: &Q) -> Result<Box<T>, RegistryError>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + Display + ?Sized,
	{
		let creator = self.read().get(key).copied();
		match creator {
			Some(creator) => Ok(creator()),
			None => Err(RegistryError::KeyNotFound(key.to_string())),
		}
	}

	/// Returns true when a creator is registered under `key`.
	pub fn is_registered<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.read().contains_key(key)
	}

	/// Returns a snapshot of the key to creator mapping.
	///
	/// The snapshot is decoupled from the registry; mutating it has no effect
	/// on registered entries.
	pub fn entries(&self) -> Vec<(K, Creator<T>)>
	where
		K: Clone,
	{
		self.read()
			.iter()
			.map(|(key, creator)| (key.clone(), *creator))
			.collect()
	}

	/// Returns the currently registered keys.
	pub fn keys(&self) -> Vec<K>
	where
		K: Clone,
	{
		self.read().keys().cloned().collect()
	}

	/// Number of registered entries.
	pub fn len(&self) -> usize {
		self.read().len()
	}

	/// Returns true when nothing has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}
}
