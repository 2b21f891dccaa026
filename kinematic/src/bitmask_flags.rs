use num_traits::{One, PrimInt};
use serde::{Deserialize, Serialize};

/// Trait implemented by flag enums that name single bits of a mask.
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index and the associated
/// `Storage` picks the backing integer.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask container.
///
/// Used for collision layer masks: a collider's layers and a query's mask are both
/// `BitmaskFlags`, and a query sees a collider when the two intersect.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Every bit set.
    pub fn all() -> Self {
        Self { bits: !T::zero() }
    }

    /// Build a mask from a list of tags.
    pub fn of<U: FlagBitmask<Storage = T> + Copy>(tags: &[U]) -> Self {
        let mut flags = Self::new(T::zero());
        flags.add_many(tags);
        flags
    }

    // --- Single Tag Operations ---
    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits | tag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }

    // --- Bulk Operations ---
    pub fn add_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, tags: &[U]) {
        for &tag in tags {
            self.add(tag);
        }
    }

    /// True when the two masks share at least one bit.
    pub fn intersects(&self, other: &Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```rust
/// kinematic::define_bitmask_flags!(SurfaceKind, u8, {
///     Ice,
///     Sticky,
///     OneWay,
/// });
///
/// assert_eq!(kinematic::bitmask_flags::FlagBitmask::mask(&SurfaceKind::OneWay), 0b100);
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}
