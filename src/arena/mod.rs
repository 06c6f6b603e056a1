//! Reference table for `r:`/`R:` backreferences.
//!
//! Slots are numbered from 1 in the order values are emitted, which is how
//! PHP's serializer counts them. Compound values reserve their slot before
//! their children are decoded, so a child may point back at its parent.

use crate::error::DecodeError;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Reserved,
    Filled(Value),
}

#[derive(Debug, Default)]
pub struct RefTable {
    slots: Vec<Slot>,
}

impl RefTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends an empty slot and returns its 1-based index.
    pub fn reserve(&mut self) -> usize {
        self.slots.push(Slot::Reserved);
        self.slots.len()
    }

    /// Stores `value` in a slot previously handed out by [`reserve`].
    ///
    /// [`reserve`]: RefTable::reserve
    pub fn fill(&mut self, index: usize, value: Value) {
        debug_assert!(index >= 1 && index <= self.slots.len());
        if let Some(slot) = index.checked_sub(1).and_then(|idx| self.slots.get_mut(idx)) {
            *slot = Slot::Filled(value);
        }
    }

    pub fn push(&mut self, value: Value) -> usize {
        self.slots.push(Slot::Filled(value));
        self.slots.len()
    }

    /// Resolves a backreference as written in the input. A slot that is
    /// reserved but not filled yet belongs to an ancestor and yields
    /// [`Value::Recursion`].
    pub fn get(&self, index: i64) -> Result<Value, DecodeError> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|idx| idx.checked_sub(1))
            .and_then(|idx| self.slots.get(idx))
            .ok_or(DecodeError::BadReference { index })?;
        match slot {
            Slot::Filled(value) => Ok(value.clone()),
            Slot::Reserved => Ok(Value::Recursion(index as usize)),
        }
    }
}
