//! Fixed-capacity registry of input devices attached to one window.
//!
//! The streaming service reports mice and keyboards with hotplug events.
//! Each window keeps one [`DeviceSlots`] per device class; input from a
//! device that does not occupy a slot is treated as stale and dropped.
//!
//! Capacity is a const generic so the "one mouse, one keyboard" limit of the
//! service is a visible type parameter instead of a hidden loop bound.

use cloudwin_core::events::DeviceHandle;
use tracing::debug;

/// Maximum number of mice tracked per window.
pub const MAX_CONNECTED_MICE: usize = 1;

/// Maximum number of keyboards tracked per window.
pub const MAX_CONNECTED_KEYBOARDS: usize = 1;

/// Outcome of [`DeviceSlots::on_attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// Stored in a free slot with freshly reset state.
    New(usize),
    /// The handle already held this slot.  Its state is untouched.
    Existing(usize),
    /// Invalid handle, or every slot is taken.
    Rejected,
}

#[derive(Debug, Clone, Default)]
struct Slot<S> {
    handle: DeviceHandle,
    state: S,
}

impl<S> Slot<S> {
    fn is_attached(&self) -> bool {
        self.handle.is_valid()
    }
}

/// `N` device slots, each holding a handle and per-device state `S`.
#[derive(Debug, Clone)]
pub struct DeviceSlots<S, const N: usize> {
    slots: [Slot<S>; N],
}

impl<S: Default, const N: usize> DeviceSlots<S, N> {
    /// Creates a registry with every slot free.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::default()),
        }
    }

    /// Stores `handle` in the first free slot with freshly reset state.
    ///
    /// A repeated attach for a handle that already holds a slot changes
    /// nothing.  A full registry is not an error: the extra device is simply
    /// ignored until a slot frees up.
    pub fn on_attach(&mut self, handle: DeviceHandle) -> Attach {
        if !handle.is_valid() {
            debug!("ignoring attach of invalid device handle");
            return Attach::Rejected;
        }
        if let Some(idx) = self.position(handle) {
            debug!(handle = handle.0, slot = idx, "device already attached");
            return Attach::Existing(idx);
        }
        let Some(idx) = self.slots.iter().position(|s| !s.is_attached()) else {
            debug!(handle = handle.0, capacity = N, "no free device slot, dropping attach");
            return Attach::Rejected;
        };
        self.slots[idx] = Slot {
            handle,
            state: S::default(),
        };
        debug!(handle = handle.0, slot = idx, "device attached");
        Attach::New(idx)
    }

    /// Frees the slot holding `handle`.  Unknown handles are a no-op.
    pub fn on_detach(&mut self, handle: DeviceHandle) -> Option<usize> {
        let idx = self.position(handle)?;
        self.slots[idx] = Slot::default();
        debug!(handle = handle.0, slot = idx, "device detached");
        Some(idx)
    }
}

impl<S, const N: usize> DeviceSlots<S, N> {
    fn position(&self, handle: DeviceHandle) -> Option<usize> {
        if !handle.is_valid() {
            return None;
        }
        self.slots.iter().position(|s| s.handle == handle)
    }

    pub fn contains(&self, handle: DeviceHandle) -> bool {
        self.position(handle).is_some()
    }

    pub fn get(&self, handle: DeviceHandle) -> Option<&S> {
        self.position(handle).map(|idx| &self.slots[idx].state)
    }

    pub fn get_mut(&mut self, handle: DeviceHandle) -> Option<&mut S> {
        self.position(handle).map(|idx| &mut self.slots[idx].state)
    }

    /// Number of attached devices.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_attached()).count()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn iter_attached(&self) -> impl Iterator<Item = (DeviceHandle, &S)> + '_ {
        self.slots
            .iter()
            .filter(|s| s.is_attached())
            .map(|s| (s.handle, &s.state))
    }

    pub fn iter_attached_mut(&mut self) -> impl Iterator<Item = (DeviceHandle, &mut S)> + '_ {
        self.slots
            .iter_mut()
            .filter(|s| s.is_attached())
            .map(|s| (s.handle, &mut s.state))
    }
}

impl<S: Default, const N: usize> Default for DeviceSlots<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Single = DeviceSlots<u32, 1>;
    type Pair = DeviceSlots<u32, 2>;

    #[test]
    fn test_new_registry_has_no_attached_devices() {
        let slots = Pair::new();
        assert_eq!(slots.occupied(), 0);
        assert_eq!(slots.capacity(), 2);
        assert_eq!(slots.iter_attached().count(), 0);
    }

    #[test]
    fn test_attach_fills_first_free_slot_with_default_state() {
        // Arrange
        let mut slots = Pair::new();

        // Act
        let first = slots.on_attach(DeviceHandle(10));
        let second = slots.on_attach(DeviceHandle(20));

        // Assert
        assert_eq!(first, Attach::New(0));
        assert_eq!(second, Attach::New(1));
        assert_eq!(slots.get(DeviceHandle(20)), Some(&0));
    }

    #[test]
    fn test_attach_beyond_capacity_is_dropped() {
        // Arrange
        let mut slots = Single::new();
        slots.on_attach(DeviceHandle(1));

        // Act
        let overflow = slots.on_attach(DeviceHandle(2));

        // Assert
        assert_eq!(overflow, Attach::Rejected);
        assert_eq!(slots.occupied(), 1);
        assert!(slots.contains(DeviceHandle(1)));
        assert!(!slots.contains(DeviceHandle(2)));
    }

    #[test]
    fn test_detach_frees_slot_for_next_device() {
        // Arrange
        let mut slots = Single::new();
        slots.on_attach(DeviceHandle(1));
        *slots.get_mut(DeviceHandle(1)).unwrap() = 99;

        // Act
        assert_eq!(slots.on_detach(DeviceHandle(1)), Some(0));
        let reattached = slots.on_attach(DeviceHandle(2));

        // Assert
        assert_eq!(reattached, Attach::New(0));
        assert!(!slots.contains(DeviceHandle(1)));
        assert_eq!(slots.get(DeviceHandle(2)), Some(&0), "state must be reset");
    }

    #[test]
    fn test_detach_unknown_handle_is_noop() {
        let mut slots = Single::new();
        slots.on_attach(DeviceHandle(1));
        assert_eq!(slots.on_detach(DeviceHandle(7)), None);
        assert_eq!(slots.occupied(), 1);
    }

    #[test]
    fn test_invalid_handle_is_never_attached_or_found() {
        let mut slots = Single::new();
        assert_eq!(slots.on_attach(DeviceHandle::INVALID), Attach::Rejected);
        assert!(!slots.contains(DeviceHandle::INVALID));
        assert_eq!(slots.on_detach(DeviceHandle::INVALID), None);
    }

    #[test]
    fn test_duplicate_attach_keeps_existing_state() {
        let mut slots = Pair::new();
        slots.on_attach(DeviceHandle(5));
        *slots.get_mut(DeviceHandle(5)).unwrap() = 3;

        assert_eq!(slots.on_attach(DeviceHandle(5)), Attach::Existing(0));
        assert_eq!(slots.occupied(), 1);
        assert_eq!(slots.get(DeviceHandle(5)), Some(&3));
    }

    #[test]
    fn test_attach_detach_sequence_never_exceeds_capacity() {
        let mut slots = Pair::new();
        for round in 0..50u64 {
            slots.on_attach(DeviceHandle(round + 1));
            if round % 3 == 0 {
                slots.on_detach(DeviceHandle(round));
            }
            assert!(slots.occupied() <= slots.capacity());
        }
    }

    #[test]
    fn test_iter_attached_mut_updates_every_device() {
        let mut slots = Pair::new();
        slots.on_attach(DeviceHandle(1));
        slots.on_attach(DeviceHandle(2));

        for (_, state) in slots.iter_attached_mut() {
            *state = 42;
        }

        assert!(slots.iter_attached().all(|(_, s)| *s == 42));
    }
}
