use crate::{AssetError, AssetId};
use glam::Vec3;
use serde_json::Value;
use std::path::Path;

const GLB_MAGIC: u32 = 0x4654_6c67; // "glTF"
const GLB_VERSION: u32 = 2;
const GLB_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const CHUNK_JSON: u32 = 0x4e4f_534a;
const CHUNK_BIN: u32 = 0x004e_4942;

/// Axis-aligned bounding box in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Unit cube centred on the origin, used when a model declares no bounds.
    pub const UNIT: Aabb = Aabb {
        min: Vec3::splat(-0.5),
        max: Vec3::splat(0.5),
    };

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Handle to an imported vehicle model.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleModel {
    pub id: AssetId,
    pub name: String,
    pub mesh_count: usize,
    pub material_count: usize,
    /// Union of all `POSITION` accessor bounds, or [`Aabb::UNIT`].
    pub bounds: Aabb,
    /// Length of the embedded binary chunk, if the container has one.
    pub binary_len: Option<usize>,
}

/// Import a `.glb` or `.gltf` file.
pub fn import_model(path: impl AsRef<Path>) -> Result<VehicleModel, AssetError> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;
    let model = match ext.as_str() {
        "glb" => parse_glb(&bytes, stem)?,
        "gltf" => parse_gltf_json(&bytes, stem)?,
        _ => return Err(AssetError::UnsupportedFormat(ext)),
    };
    tracing::debug!(
        path = %path.display(),
        id = %model.id,
        meshes = model.mesh_count,
        "imported model"
    );
    Ok(model)
}

/// Parse a binary glTF container.
pub fn parse_glb(bytes: &[u8], fallback_name: &str) -> Result<VehicleModel, AssetError> {
    if bytes.len() < GLB_HEADER_LEN {
        return Err(bad("truncated header"));
    }
    let magic = read_u32(bytes, 0);
    if magic != GLB_MAGIC {
        return Err(bad(format!("unexpected magic {magic:#010x}")));
    }
    let version = read_u32(bytes, 4);
    if version != GLB_VERSION {
        return Err(bad(format!("unsupported version {version}")));
    }
    let declared = read_u32(bytes, 8) as usize;
    if declared > bytes.len() {
        return Err(bad(format!(
            "declared length {declared} exceeds {} bytes",
            bytes.len()
        )));
    }
    let body = &bytes[..declared];

    let (kind, json, next) =
        read_chunk(body, GLB_HEADER_LEN)?.ok_or_else(|| bad("missing JSON chunk"))?;
    if kind != CHUNK_JSON {
        return Err(bad(format!("first chunk has type {kind:#010x}, expected JSON")));
    }

    let binary_len = match read_chunk(body, next)? {
        Some((CHUNK_BIN, data, _)) => Some(data.len()),
        _ => None,
    };

    let mut model = model_from_json(json, AssetId::of_bytes(bytes), fallback_name)?;
    model.binary_len = binary_len;
    Ok(model)
}

/// Parse a standalone glTF JSON document.
pub fn parse_gltf_json(bytes: &[u8], fallback_name: &str) -> Result<VehicleModel, AssetError> {
    model_from_json(bytes, AssetId::of_bytes(bytes), fallback_name)
}

fn model_from_json(
    json: &[u8],
    id: AssetId,
    fallback_name: &str,
) -> Result<VehicleModel, AssetError> {
    let doc: Value = serde_json::from_slice(json)?;

    let count = |key: &str| doc.get(key).and_then(Value::as_array).map_or(0, Vec::len);
    let scene_index = doc.get("scene").and_then(Value::as_u64).unwrap_or(0) as usize;
    let name = doc
        .get("scenes")
        .and_then(Value::as_array)
        .and_then(|scenes| scenes.get(scene_index))
        .and_then(|scene| scene.get("name"))
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback_name)
        .to_string();

    Ok(VehicleModel {
        id,
        name,
        mesh_count: count("meshes"),
        material_count: count("materials"),
        bounds: position_bounds(&doc).unwrap_or(Aabb::UNIT),
        binary_len: None,
    })
}

fn position_bounds(doc: &Value) -> Option<Aabb> {
    let accessors = doc.get("accessors")?.as_array()?;
    let meshes = doc.get("meshes")?.as_array()?;

    let primitives = meshes
        .iter()
        .filter_map(|mesh| mesh.get("primitives").and_then(Value::as_array))
        .flatten();

    let mut bounds: Option<Aabb> = None;
    for primitive in primitives {
        let Some(index) = primitive
            .get("attributes")
            .and_then(|a| a.get("POSITION"))
            .and_then(Value::as_u64)
        else {
            continue;
        };
        let Some(accessor) = accessors.get(index as usize) else {
            tracing::warn!(index, "POSITION refers to a missing accessor");
            continue;
        };
        let (Some(min), Some(max)) = (vec3_field(accessor, "min"), vec3_field(accessor, "max"))
        else {
            continue;
        };
        let b = Aabb { min, max };
        bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
    }
    bounds
}

fn vec3_field(value: &Value, key: &str) -> Option<Vec3> {
    let arr = value.get(key)?.as_array()?;
    let c = |i: usize| arr.get(i).and_then(Value::as_f64).map(|v| v as f32);
    Some(Vec3::new(c(0)?, c(1)?, c(2)?))
}

/// Read the chunk starting at `offset`. Returns `(type, data, next_offset)`,
/// or `None` when `offset` is at the end of `body`.
fn read_chunk(body: &[u8], offset: usize) -> Result<Option<(u32, &[u8], usize)>, AssetError> {
    if offset >= body.len() {
        return Ok(None);
    }
    if body.len() - offset < CHUNK_HEADER_LEN {
        return Err(bad(format!("truncated chunk header at {offset}")));
    }
    let len = read_u32(body, offset) as usize;
    let kind = read_u32(body, offset + 4);
    let start = offset + CHUNK_HEADER_LEN;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= body.len())
        .ok_or_else(|| bad(format!("chunk at {offset} overruns container")))?;
    Ok(Some((kind, &body[start..end], end)))
}

/// Little-endian u32 at `offset`. Callers check bounds first.
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}

fn bad(reason: impl Into<String>) -> AssetError {
    AssetError::BadContainer(reason.into())
}
