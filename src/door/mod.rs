//! Door state: sensor fusion, timed polling, and the close supervisor.
//!
//! The door counts as closed only when **both** the contact switch and the
//! optical alignment sensor agree.  A single failed or disconnected sensor
//! therefore can never report a closed door.
//!
//! | contact | optical | reading |
//! |---------|---------|---------|
//! | closed  | aligned | Closed  |
//! | closed  | open    | Open    |
//! | open    | aligned | Open    |
//! | open    | blocked | Open    |

pub mod poll;
pub mod supervisor;

use crate::app::ports::DoorSensorPort;

/// Logical door state derived from both raw signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorReading {
    Closed,
    Open,
}

impl DoorReading {
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

/// Combine the two raw signals.  Any disagreement resolves to `Open`.
pub const fn fuse(contact_closed: bool, optical_aligned: bool) -> DoorReading {
    if contact_closed && optical_aligned {
        DoorReading::Closed
    } else {
        DoorReading::Open
    }
}

/// Read both sensors now and fuse them.  Stateless; safe to call at any rate.
pub fn sample(sensors: &mut (impl DoorSensorPort + ?Sized)) -> DoorReading {
    let contact = sensors.contact_closed();
    let optical = sensors.optical_aligned();
    fuse(contact, optical)
}
