//! Type identity used as the registry key

use std::{
    any::{TypeId, type_name},
    fmt::{Debug, Display, Formatter},
    hash::{BuildHasherDefault, Hash, Hasher}
};

/// Identifies a producible type within the process.
///
/// Equality and hashing only look at the [`TypeId`], the name is kept
/// for diagnostics. Two structurally identical types are distinct keys.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str
}

impl TypeKey {
    /// Returns the key of `T`
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    /// Returns the type name of this key
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the underlying [`TypeId`]
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Hasher state for maps keyed by [`TypeKey`]
pub(crate) type BuildTypeKeyHasher = BuildHasherDefault<TypeIdHasher>;

/// [`TypeId`] is already a hash, so it is passed through as is
#[derive(Default)]
pub(crate) struct TypeIdHasher(u64);

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            self.0 ^= u64::from_ne_bytes(buf);
        }
    }

    #[inline]
    fn write_u64(&mut self, id: u64) {
        self.0 = id;
    }
}
