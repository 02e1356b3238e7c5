//! Built-in component tags and instance ids.
//!
//! Outbound and inbound topics share the tag space starting at 100; the
//! direction tells them apart. Tags below 100 are free for custom topics,
//! which the raw codec and registry accept as plain `u8`.

use std::fmt;

use serde::Serialize;

use crate::error::FrameError;

/// Topics this side sends to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SendComponent {
    Speed = 100,
    Distance = 101,
}

/// Topics this side receives from the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ReceivedComponent {
    Button = 100,
    Joystick = 101,
}

impl SendComponent {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            SendComponent::Speed => "speed",
            SendComponent::Distance => "distance",
        }
    }
}

impl ReceivedComponent {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ReceivedComponent::Button => "button",
            ReceivedComponent::Joystick => "joystick",
        }
    }
}

impl From<SendComponent> for u8 {
    fn from(component: SendComponent) -> Self {
        component as u8
    }
}

impl From<ReceivedComponent> for u8 {
    fn from(component: ReceivedComponent) -> Self {
        component as u8
    }
}

impl TryFrom<u8> for SendComponent {
    type Error = FrameError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            100 => Ok(SendComponent::Speed),
            101 => Ok(SendComponent::Distance),
            other => Err(FrameError::UnknownComponent(other)),
        }
    }
}

impl TryFrom<u8> for ReceivedComponent {
    type Error = FrameError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            100 => Ok(ReceivedComponent::Button),
            101 => Ok(ReceivedComponent::Joystick),
            other => Err(FrameError::UnknownComponent(other)),
        }
    }
}

impl fmt::Display for SendComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ReceivedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instance of a component, e.g. which of several buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct InstanceId(u8);

impl InstanceId {
    /// Highest supported instance id.
    pub const MAX: u8 = 15;

    /// Validate an instance id.
    pub fn new(id: u8) -> Result<Self, FrameError> {
        if id > Self::MAX {
            return Err(FrameError::InvalidInstanceId(id));
        }
        Ok(Self(id))
    }

    /// Wire value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for InstanceId {
    type Error = FrameError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<InstanceId> for u8 {
    fn from(id: InstanceId) -> Self {
        id.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_tags() {
        assert_eq!(u8::from(SendComponent::Speed), 100);
        assert_eq!(u8::from(SendComponent::Distance), 101);
        assert_eq!(u8::from(ReceivedComponent::Button), 100);
        assert_eq!(u8::from(ReceivedComponent::Joystick), 101);
    }

    #[test]
    fn component_round_trip_through_tag() {
        assert_eq!(
            ReceivedComponent::try_from(101).unwrap(),
            ReceivedComponent::Joystick
        );
        assert_eq!(SendComponent::try_from(100).unwrap(), SendComponent::Speed);
    }

    #[test]
    fn unknown_component_rejected() {
        assert!(matches!(
            ReceivedComponent::try_from(7),
            Err(FrameError::UnknownComponent(7))
        ));
        assert!(SendComponent::try_from(102).is_err());
    }

    #[test]
    fn instance_id_bounds() {
        assert_eq!(InstanceId::new(0).unwrap().get(), 0);
        assert_eq!(InstanceId::new(15).unwrap().get(), 15);
        assert!(matches!(
            InstanceId::new(16),
            Err(FrameError::InvalidInstanceId(16))
        ));
    }
}
