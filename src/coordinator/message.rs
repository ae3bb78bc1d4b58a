//! User-facing outcome of a coordinator lifecycle call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the hosting screen should tell the user after a lifecycle call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Nothing to show.
    #[default]
    None,
    PlayServicesUnavailable,
    LocationPrefDisabled,
    ProvidersDisabled,
    CollectingLocation,
}

impl Message {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The message as an `Option`, with `None` for nothing to show.
    #[must_use]
    pub fn visible(self) -> Option<Self> {
        match self {
            Self::None => None,
            other => Some(other),
        }
    }

    /// Whether the message reports a precondition that blocks collection.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::PlayServicesUnavailable | Self::LocationPrefDisabled | Self::ProvidersDisabled
        )
    }

    /// Text suitable for showing to the person filling the form.
    #[must_use]
    pub fn user_text(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::PlayServicesUnavailable => {
                "This form collects location, but location services are not available on this device."
            }
            Self::LocationPrefDisabled => {
                "This form collects location, but background location is turned off in settings."
            }
            Self::ProvidersDisabled => {
                "This form collects location. Turn on location providers to allow collection."
            }
            Self::CollectingLocation => "This form collects location in the background.",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PlayServicesUnavailable => "play_services_unavailable",
            Self::LocationPrefDisabled => "location_pref_disabled",
            Self::ProvidersDisabled => "providers_disabled",
            Self::CollectingLocation => "collecting_location",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
