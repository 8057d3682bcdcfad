//! Ordered, deduplicated participant list for one session.

use crate::domain::UserId;
use crate::errors::domain::DomainError;

/// Participants in display (join) order. The organizer is always first and
/// can never be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    organizer: UserId,
    members: Vec<UserId>,
    capacity: usize,
}

impl Roster {
    pub fn new(organizer: UserId, capacity: usize) -> Self {
        let mut members = Vec::with_capacity(capacity);
        members.push(organizer);
        Self {
            organizer,
            members,
            capacity,
        }
    }

    pub fn join(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.contains(user) {
            return Err(DomainError::AlreadyJoined(user));
        }
        if self.is_full() {
            return Err(DomainError::Full(self.capacity));
        }
        self.members.push(user);
        Ok(())
    }

    pub fn leave(&mut self, user: UserId) -> Result<(), DomainError> {
        if user == self.organizer {
            return Err(DomainError::IsOrganizer);
        }
        let pos = self
            .members
            .iter()
            .position(|&member| member == user)
            .ok_or(DomainError::NotJoined(user))?;
        // `remove` keeps everyone else in join order.
        self.members.remove(pos);
        Ok(())
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    pub fn organizer(&self) -> UserId {
        self.organizer
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }
}
