pub mod events;
pub mod presence;
pub mod socket;

pub use presence::PresenceHub;
