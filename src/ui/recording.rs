// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! A `Ui` that records every call as a serializable effect.

use super::{FormView, MapHandle, MapWidget, MarkerHandle, Notifier, WorkoutListView};
use crate::models::{Coordinate, ListEntry, MarkerRequest};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One collaborator call, in the order the session made it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UiEffect {
    MapInitialized {
        map: MapHandle,
        #[cfg_attr(feature = "binding-generation", ts(as = "crate::models::LatLng"))]
        center: Coordinate,
        zoom: u8,
    },
    TileLayerAdded {
        map: MapHandle,
        url_template: String,
        attribution: String,
    },
    ClickListenerAttached {
        map: MapHandle,
    },
    MarkerPlaced {
        map: MapHandle,
        marker: MarkerHandle,
        request: MarkerRequest,
    },
    FormShown,
    DistanceFocused,
    KindFieldsToggled,
    FieldsCleared,
    FormHidden,
    FormTransitionRestored,
    ListEntryAppended {
        entry: ListEntry,
    },
    Notice {
        message: String,
    },
}

/// Buffers effects until they are drained.
#[derive(Debug, Default)]
pub struct RecordingUi {
    effects: Vec<UiEffect>,
    maps: u32,
    markers: u32,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects recorded since the last drain.
    pub fn effects(&self) -> &[UiEffect] {
        &self.effects
    }

    pub fn drain(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Notices among the buffered effects.
    pub fn notices(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                UiEffect::Notice { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl MapWidget for RecordingUi {
    fn initialize_map(&mut self, center: Coordinate, zoom: u8) -> MapHandle {
        self.maps += 1;
        let map = MapHandle(self.maps);
        self.effects
            .push(UiEffect::MapInitialized { map, center, zoom });
        map
    }

    fn add_tile_layer(&mut self, map: MapHandle, url_template: &str, attribution: &str) {
        self.effects.push(UiEffect::TileLayerAdded {
            map,
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
    }

    fn listen_for_clicks(&mut self, map: MapHandle) {
        self.effects.push(UiEffect::ClickListenerAttached { map });
    }

    fn place_marker(&mut self, map: MapHandle, marker: &MarkerRequest) -> MarkerHandle {
        self.markers += 1;
        let handle = MarkerHandle(self.markers);
        self.effects.push(UiEffect::MarkerPlaced {
            map,
            marker: handle,
            request: marker.clone(),
        });
        handle
    }
}

impl FormView for RecordingUi {
    fn show_form(&mut self) {
        self.effects.push(UiEffect::FormShown);
    }

    fn focus_distance(&mut self) {
        self.effects.push(UiEffect::DistanceFocused);
    }

    fn toggle_kind_fields(&mut self) {
        self.effects.push(UiEffect::KindFieldsToggled);
    }

    fn clear_fields(&mut self) {
        self.effects.push(UiEffect::FieldsCleared);
    }

    fn hide_form_immediately(&mut self) {
        self.effects.push(UiEffect::FormHidden);
    }

    fn restore_form_transition(&mut self) {
        self.effects.push(UiEffect::FormTransitionRestored);
    }
}

impl WorkoutListView for RecordingUi {
    fn append_entry(&mut self, entry: &ListEntry) {
        self.effects.push(UiEffect::ListEntryAppended {
            entry: entry.clone(),
        });
    }
}

impl Notifier for RecordingUi {
    fn notify(&mut self, message: &str) {
        self.effects.push(UiEffect::Notice {
            message: message.to_string(),
        });
    }
}
