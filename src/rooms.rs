// Room composition: passengers are classified by age and counted per room
use crate::field::leading_int;

/// Passengers at or under this age travel as children.
pub const CHILD_MAX_AGE: i64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPax {
    age: Option<String>,
}

impl RoomPax {
    pub fn new(age: Option<String>) -> Self {
        Self { age }
    }

    // A missing or unreadable age counts as 0
    pub fn age(&self) -> i64 {
        self.age.as_deref().map_or(0, leading_int)
    }

    pub fn is_child(&self) -> bool {
        self.age() <= CHILD_MAX_AGE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomCandidate {
    pub id: String,
    pub adult_count: u32,
    pub child_count: u32,
}

impl RoomCandidate {
    pub fn from_paxes<'a>(id: impl Into<String>, paxes: impl IntoIterator<Item = &'a RoomPax>) -> Self {
        let mut room = Self {
            id: id.into(),
            ..Self::default()
        };

        for pax in paxes {
            if pax.is_child() {
                room.child_count += 1;
            } else {
                room.adult_count += 1;
            }
        }
        room
    }

    pub fn guest_count(&self) -> u32 {
        self.adult_count + self.child_count
    }

    /// A room needs at least one adult, must fit the guest limit, and may hold
    /// children only up to the per-room child limit.
    pub fn is_acceptable(&self, allowed_guests: u32, allowed_children: u32) -> bool {
        if self.adult_count == 0 || self.guest_count() > allowed_guests {
            return false;
        }
        self.child_count == 0 || self.child_count <= allowed_children
    }
}
