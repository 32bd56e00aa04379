use glam::Vec3;
use laneway_assets::VehicleModel;
use laneway_common::{DriveConfig, Rgba, Transform, rgb_hex};
use laneway_kernel::VehiclePose;

/// Thickness given to flat scenery so it can be drawn as boxes.
const SLAB: f32 = 0.02;
const GRASS_LEVEL: f32 = -0.01;
const MARKING_LEVEL: f32 = 0.02;

const ROAD_COLOR: u32 = 0x3b3b3e;
const GRASS_COLOR: u32 = 0x4a7f2c;
const MARKING_COLOR: u32 = 0xffff00;
const VEHICLE_COLOR: u32 = 0xc0392b;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Grass,
    Road,
    LaneMarking,
    Vehicle,
}

/// A coloured box in world space. The transform maps the unit cube
/// (`-0.5..=0.5` on every axis) onto the item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneItem {
    pub kind: ItemKind,
    pub transform: Transform,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Rgba,
    pub ground: Rgba,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgba,
    pub intensity: f32,
    /// The light shines from this point toward the origin.
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Rgba,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub hemisphere: HemisphereLight,
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            hemisphere: HemisphereLight {
                sky: rgb_hex(0xffffff),
                ground: rgb_hex(0x444444),
                intensity: 1.2,
            },
            directional: DirectionalLight {
                color: rgb_hex(0xffffff),
                intensity: 1.0,
                position: Vec3::new(10.0, 20.0, 10.0),
            },
            ambient: AmbientLight {
                color: rgb_hex(0x404040),
                intensity: 1.5,
            },
        }
    }
}

/// Static outdoor scenery: grass, road and lane markings under a sky colour.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub sky_hex: u32,
    pub sky: Rgba,
    pub lighting: Lighting,
    pub items: Vec<SceneItem>,
    vehicle_scale: f32,
}

impl SceneLayout {
    pub fn build(config: &DriveConfig) -> Self {
        let road = &config.road;
        let scene = &config.scene;
        let mut items = Vec::new();

        items.push(SceneItem {
            kind: ItemKind::Grass,
            transform: slab(
                Vec3::new(0.0, GRASS_LEVEL, 0.0),
                scene.grass_size,
                scene.grass_size,
            ),
            color: rgb_hex(GRASS_COLOR),
        });
        items.push(SceneItem {
            kind: ItemKind::Road,
            transform: slab(Vec3::ZERO, road.width(), road.length),
            color: rgb_hex(ROAD_COLOR),
        });

        let half_length = road.length / 2.0;
        let mut z = -half_length + scene.marking_start_offset;
        while z < half_length {
            items.push(SceneItem {
                kind: ItemKind::LaneMarking,
                transform: slab(
                    Vec3::new(0.0, MARKING_LEVEL, z),
                    scene.marking_width,
                    scene.marking_length,
                ),
                color: rgb_hex(MARKING_COLOR),
            });
            z += scene.marking_spacing;
        }

        tracing::debug!(items = items.len(), "scene layout built");
        Self {
            sky_hex: scene.sky_color,
            sky: rgb_hex(scene.sky_color),
            lighting: Lighting::default(),
            items,
            vehicle_scale: config.vehicle.scale,
        }
    }

    pub fn lane_markings(&self) -> impl Iterator<Item = &SceneItem> {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::LaneMarking)
    }

    /// Box covering `model`'s bounds, scaled and placed at `pose`.
    pub fn vehicle_item(&self, pose: &VehiclePose, model: &VehicleModel) -> SceneItem {
        let body = pose.transform(self.vehicle_scale);
        let offset = body.rotation * (model.bounds.center() * self.vehicle_scale);
        SceneItem {
            kind: ItemKind::Vehicle,
            transform: Transform {
                position: pose.position + offset,
                rotation: body.rotation,
                scale: model.bounds.size() * self.vehicle_scale,
            },
            color: rgb_hex(VEHICLE_COLOR),
        }
    }
}

/// Flat box of `width` x `length` whose top face sits at `top.y`.
fn slab(top: Vec3, width: f32, length: f32) -> Transform {
    Transform::from_position_scale(
        top - Vec3::Y * (SLAB / 2.0),
        Vec3::new(width, SLAB, length),
    )
}
