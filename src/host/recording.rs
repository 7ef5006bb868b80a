//! In-memory host that records every authoring call.

use crate::foundation::core::{Point, Rgb};
use crate::foundation::error::{MeshError, MeshResult};
use crate::host::{ClosedPath, CompositionInfo, Host, LayerId, PropertyId, StrokeStyle};
use crate::mesh::model::Interpolation;
use serde::Serialize;
use std::collections::HashMap;

/// One applied authoring call, in call order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostOp {
    /// [`Host::begin_undo_group`].
    BeginUndoGroup {
        /// Undo step label.
        name: String,
    },
    /// [`Host::end_undo_group`].
    EndUndoGroup,
    /// [`Host::set_duration`].
    SetDuration {
        /// New duration in seconds.
        secs: f64,
    },
    /// [`Host::add_shape_layer`].
    AddShapeLayer {
        /// Created layer.
        layer: LayerId,
        /// Layer name.
        name: String,
    },
    /// [`Host::set_anchor_point`].
    SetAnchorPoint {
        /// Target layer.
        layer: LayerId,
        /// Anchor in pixels.
        anchor: Point,
    },
    /// [`Host::add_shape_group`].
    AddShapeGroup {
        /// Owning layer.
        layer: LayerId,
        /// Created group.
        property: PropertyId,
    },
    /// [`Host::add_stroke`].
    AddStroke {
        /// Owning layer.
        layer: LayerId,
        /// Created stroke.
        property: PropertyId,
        /// Stroke settings.
        style: StrokeStyle,
    },
    /// [`Host::add_fill`].
    AddFill {
        /// Owning layer.
        layer: LayerId,
        /// Created fill.
        property: PropertyId,
    },
    /// [`Host::set_path_at_time`].
    SetPathAtTime {
        /// Target group.
        property: PropertyId,
        /// Keyframe time in seconds.
        time: f64,
        /// Path value.
        path: ClosedPath,
    },
    /// [`Host::set_fill_color_at_time`].
    SetFillColorAtTime {
        /// Target fill.
        property: PropertyId,
        /// Keyframe time in seconds.
        time: f64,
        /// Color value.
        color: Rgb,
    },
    /// [`Host::set_keyframe_interpolation`].
    SetKeyframeInterpolation {
        /// Target property.
        property: PropertyId,
        /// Time of the keyframe.
        time: f64,
        /// Interpolation applied in and out.
        interpolation: Interpolation,
    },
}

/// Keyframe of an animated property.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Key<T> {
    /// Time in seconds.
    pub time: f64,
    /// Value at `time`.
    pub value: T,
    /// Interpolation, when one was set explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolation: Option<Interpolation>,
}

/// Item of a shape layer's contents, in stacking order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorItem {
    /// Path group with its animated geometry.
    Group {
        /// Handle.
        id: PropertyId,
        /// Path keyframes sorted by time.
        path: Vec<Key<ClosedPath>>,
    },
    /// Static stroke graphic.
    Stroke {
        /// Handle.
        id: PropertyId,
        /// Stroke settings.
        style: StrokeStyle,
    },
    /// Fill graphic with its animated color.
    Fill {
        /// Handle.
        id: PropertyId,
        /// Color keyframes sorted by time.
        color: Vec<Key<Rgb>>,
    },
}

/// Shape layer as authored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeLayer {
    /// Handle.
    pub id: LayerId,
    /// Layer name.
    pub name: String,
    /// Transform anchor point in pixels.
    pub anchor_point: Point,
    /// Contents in stacking order.
    pub contents: Vec<VectorItem>,
}

/// Everything a [`RecordingHost`] has authored so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Document {
    /// Composition duration in seconds.
    pub duration: f64,
    /// Layers in creation order.
    pub layers: Vec<ShapeLayer>,
}

/// In-memory [`Host`] for tests, dry runs and the CLI.
///
/// Applied calls are appended to [`RecordingHost::ops`] and reflected in
/// [`RecordingHost::document`]. Rejected calls leave both untouched.
#[derive(Debug, Default)]
pub struct RecordingHost {
    comp: Option<CompositionInfo>,
    ops: Vec<HostOp>,
    document: Document,
    undo_depth: usize,
    next_property: u32,
    properties: HashMap<PropertyId, (usize, usize)>,
}

impl RecordingHost {
    /// Create a host with an active composition.
    pub fn new(comp: CompositionInfo) -> Self {
        Self {
            comp: Some(comp),
            document: Document {
                duration: comp.duration,
                layers: Vec::new(),
            },
            ..Self::default()
        }
    }

    /// Create a host with no active composition.
    pub fn without_composition() -> Self {
        Self::default()
    }

    /// Applied calls in call order.
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Authored document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of currently open undo groups.
    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }

    fn require_composition(&self) -> MeshResult<CompositionInfo> {
        self.comp
            .ok_or_else(|| MeshError::host("no active composition"))
    }

    fn layer_mut(&mut self, layer: LayerId) -> MeshResult<&mut ShapeLayer> {
        self.document
            .layers
            .get_mut(layer.0 as usize)
            .ok_or_else(|| MeshError::host(format!("unknown layer {}", layer.0)))
    }

    fn push_item(
        &mut self,
        layer: LayerId,
        make: impl FnOnce(PropertyId) -> VectorItem,
    ) -> MeshResult<PropertyId> {
        let property = PropertyId(self.next_property);
        let contents = &mut self.layer_mut(layer)?.contents;
        contents.push(make(property));
        let slot = (layer.0 as usize, contents.len() - 1);
        self.properties.insert(property, slot);
        self.next_property += 1;
        Ok(property)
    }

    fn item_mut(&mut self, property: PropertyId) -> MeshResult<&mut VectorItem> {
        let &(layer, item) = self
            .properties
            .get(&property)
            .ok_or_else(|| MeshError::host(format!("unknown property {}", property.0)))?;
        Ok(&mut self.document.layers[layer].contents[item])
    }
}

fn check_time(time: f64) -> MeshResult<()> {
    if !time.is_finite() || time < 0.0 {
        return Err(MeshError::host(format!(
            "keyframe time must be finite and >= 0, got {time}"
        )));
    }
    Ok(())
}

/// Insert or replace the key at `time`, keeping keys sorted.
fn set_key<T>(keys: &mut Vec<Key<T>>, time: f64, value: T) {
    match keys.iter_mut().find(|k| k.time == time) {
        Some(k) => k.value = value,
        None => {
            let at = keys.partition_point(|k| k.time < time);
            keys.insert(
                at,
                Key {
                    time,
                    value,
                    interpolation: None,
                },
            );
        }
    }
}

fn set_interpolation<T>(
    keys: &mut [Key<T>],
    time: f64,
    interpolation: Interpolation,
) -> MeshResult<()> {
    let key = keys
        .iter_mut()
        .find(|k| k.time == time)
        .ok_or_else(|| MeshError::host(format!("no keyframe at time {time}")))?;
    key.interpolation = Some(interpolation);
    Ok(())
}

impl Host for RecordingHost {
    fn composition(&self) -> Option<CompositionInfo> {
        self.comp
    }

    fn begin_undo_group(&mut self, name: &str) -> MeshResult<()> {
        self.undo_depth += 1;
        self.ops.push(HostOp::BeginUndoGroup {
            name: name.to_owned(),
        });
        Ok(())
    }

    fn end_undo_group(&mut self) -> MeshResult<()> {
        if self.undo_depth == 0 {
            return Err(MeshError::host("end_undo_group without a matching begin"));
        }
        self.undo_depth -= 1;
        self.ops.push(HostOp::EndUndoGroup);
        Ok(())
    }

    fn set_duration(&mut self, secs: f64) -> MeshResult<()> {
        let mut comp = self.require_composition()?;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(MeshError::host(format!(
                "composition duration must be finite and > 0, got {secs}"
            )));
        }
        comp.duration = secs;
        self.comp = Some(comp);
        self.document.duration = secs;
        self.ops.push(HostOp::SetDuration { secs });
        Ok(())
    }

    fn add_shape_layer(&mut self, name: &str) -> MeshResult<LayerId> {
        self.require_composition()?;
        let layer = LayerId(
            u32::try_from(self.document.layers.len())
                .map_err(|_| MeshError::host("too many layers"))?,
        );
        self.document.layers.push(ShapeLayer {
            id: layer,
            name: name.to_owned(),
            anchor_point: Point::ORIGIN,
            contents: Vec::new(),
        });
        self.ops.push(HostOp::AddShapeLayer {
            layer,
            name: name.to_owned(),
        });
        Ok(layer)
    }

    fn set_anchor_point(&mut self, layer: LayerId, anchor: Point) -> MeshResult<()> {
        self.layer_mut(layer)?.anchor_point = anchor;
        self.ops.push(HostOp::SetAnchorPoint { layer, anchor });
        Ok(())
    }

    fn add_shape_group(&mut self, layer: LayerId) -> MeshResult<PropertyId> {
        let property = self.push_item(layer, |id| VectorItem::Group {
            id,
            path: Vec::new(),
        })?;
        self.ops.push(HostOp::AddShapeGroup { layer, property });
        Ok(property)
    }

    fn add_stroke(&mut self, layer: LayerId, style: StrokeStyle) -> MeshResult<PropertyId> {
        let property = self.push_item(layer, |id| VectorItem::Stroke { id, style })?;
        self.ops.push(HostOp::AddStroke {
            layer,
            property,
            style,
        });
        Ok(property)
    }

    fn add_fill(&mut self, layer: LayerId) -> MeshResult<PropertyId> {
        let property = self.push_item(layer, |id| VectorItem::Fill {
            id,
            color: Vec::new(),
        })?;
        self.ops.push(HostOp::AddFill { layer, property });
        Ok(property)
    }

    fn set_path_at_time(
        &mut self,
        group: PropertyId,
        time: f64,
        path: ClosedPath,
    ) -> MeshResult<()> {
        check_time(time)?;
        let VectorItem::Group { path: keys, .. } = self.item_mut(group)? else {
            return Err(MeshError::host(format!(
                "property {} is not a path group",
                group.0
            )));
        };
        set_key(keys, time, path.clone());
        self.ops.push(HostOp::SetPathAtTime {
            property: group,
            time,
            path,
        });
        Ok(())
    }

    fn set_fill_color_at_time(&mut self, fill: PropertyId, time: f64, color: Rgb) -> MeshResult<()> {
        check_time(time)?;
        let VectorItem::Fill { color: keys, .. } = self.item_mut(fill)? else {
            return Err(MeshError::host(format!("property {} is not a fill", fill.0)));
        };
        set_key(keys, time, color);
        self.ops.push(HostOp::SetFillColorAtTime {
            property: fill,
            time,
            color,
        });
        Ok(())
    }

    fn set_keyframe_interpolation(
        &mut self,
        property: PropertyId,
        time: f64,
        interpolation: Interpolation,
    ) -> MeshResult<()> {
        match self.item_mut(property)? {
            VectorItem::Group { path, .. } => set_interpolation(path, time, interpolation)?,
            VectorItem::Fill { color, .. } => set_interpolation(color, time, interpolation)?,
            VectorItem::Stroke { .. } => {
                return Err(MeshError::host(format!(
                    "property {} has no keyframes",
                    property.0
                )));
            }
        }
        self.ops.push(HostOp::SetKeyframeInterpolation {
            property,
            time,
            interpolation,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/recording.rs"]
mod tests;
