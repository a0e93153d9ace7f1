use std::collections::BTreeMap;
use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use viewfit_common::{Aabb, BoundingVolume};

use crate::error::AssetError;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_CHUNK_JSON: u32 = 0x4E4F_534A;

/// Deepest node hierarchy accepted before the document is treated as cyclic.
const MAX_NODE_DEPTH: usize = 256;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    scene: Option<usize>,
    scenes: Vec<Scene>,
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    accessors: Vec<Accessor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scene {
    nodes: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Node {
    children: Vec<usize>,
    mesh: Option<usize>,
    matrix: Option<[f32; 16]>,
    translation: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
}

impl Node {
    fn local_transform(&self) -> Mat4 {
        if let Some(m) = self.matrix {
            return Mat4::from_cols_array(&m);
        }
        let translation = self.translation.map_or(Vec3::ZERO, Vec3::from_array);
        let rotation = self
            .rotation
            .map_or(Quat::IDENTITY, |r| Quat::from_array(r).normalize());
        let scale = self.scale.map_or(Vec3::ONE, Vec3::from_array);
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Mesh {
    primitives: Vec<Primitive>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Primitive {
    attributes: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Accessor {
    min: Option<Vec<f32>>,
    max: Option<Vec<f32>>,
}

impl Accessor {
    fn local_box(&self, index: usize) -> Result<Aabb, AssetError> {
        let corner = |v: &Option<Vec<f32>>, which: &str| match v.as_deref() {
            Some([x, y, z, ..]) => Ok(Vec3::new(*x, *y, *z)),
            _ => Err(AssetError::GltfParse(format!(
                "POSITION accessor {index} has no 3-component {which}"
            ))),
        };
        Ok(Aabb::new(corner(&self.min, "min")?, corner(&self.max, "max")?))
    }
}

/// World-space box of every mesh reachable from a model's scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelBounds {
    pub aabb: Aabb,
    /// Mesh instances that contributed to the box.
    pub mesh_instances: usize,
}

impl ModelBounds {
    pub fn volume(&self) -> BoundingVolume {
        // Construction rejects empty boxes, so the diagonal is defined.
        BoundingVolume::new(self.aabb.center(), self.aabb.diagonal())
    }

    /// Read a `.gltf` (JSON) or `.glb` (binary container) file.
    pub fn from_gltf_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let bounds = if bytes.starts_with(GLB_MAGIC) {
            Self::from_gltf_slice(glb_json_chunk(&bytes)?)?
        } else {
            Self::from_gltf_slice(&bytes)?
        };
        tracing::debug!(
            path = %path.display(),
            meshes = bounds.mesh_instances,
            diagonal = bounds.aabb.diagonal(),
            "computed model bounds"
        );
        Ok(bounds)
    }

    pub fn from_gltf_str(json: &str) -> Result<Self, AssetError> {
        Self::from_gltf_slice(json.as_bytes())
    }

    fn from_gltf_slice(json: &[u8]) -> Result<Self, AssetError> {
        let doc: Document = serde_json::from_slice(json)?;
        doc.bounds()
    }
}

impl Document {
    /// Nodes of the default scene, or every parentless node when the
    /// document declares no scenes.
    fn root_nodes(&self) -> Result<Vec<usize>, AssetError> {
        if self.scenes.is_empty() {
            let mut is_child = vec![false; self.nodes.len()];
            for child in self.nodes.iter().flat_map(|n| &n.children) {
                if let Some(flag) = is_child.get_mut(*child) {
                    *flag = true;
                }
            }
            return Ok((0..self.nodes.len()).filter(|&i| !is_child[i]).collect());
        }
        let index = self.scene.unwrap_or(0);
        self.scenes
            .get(index)
            .map(|s| s.nodes.clone())
            .ok_or_else(|| AssetError::GltfParse(format!("scene {index} does not exist")))
    }

    fn bounds(&self) -> Result<ModelBounds, AssetError> {
        let mut aabb = Aabb::EMPTY;
        let mut mesh_instances = 0;

        let mut stack: Vec<(usize, Mat4, usize)> = self
            .root_nodes()?
            .into_iter()
            .map(|n| (n, Mat4::IDENTITY, 0))
            .collect();

        while let Some((index, parent, depth)) = stack.pop() {
            if depth > MAX_NODE_DEPTH {
                return Err(AssetError::GltfParse(
                    "node hierarchy is too deep or cyclic".into(),
                ));
            }
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| AssetError::GltfParse(format!("node {index} does not exist")))?;
            let world = parent * node.local_transform();

            if let Some(mesh_index) = node.mesh {
                let mesh = self.meshes.get(mesh_index).ok_or_else(|| {
                    AssetError::GltfParse(format!("mesh {mesh_index} does not exist"))
                })?;
                for primitive in &mesh.primitives {
                    let Some(&accessor_index) = primitive.attributes.get("POSITION") else {
                        continue;
                    };
                    let accessor = self.accessors.get(accessor_index).ok_or_else(|| {
                        AssetError::GltfParse(format!("accessor {accessor_index} does not exist"))
                    })?;
                    aabb = aabb.union(&accessor.local_box(accessor_index)?.transformed(&world));
                }
                mesh_instances += 1;
            }

            stack.extend(node.children.iter().map(|&c| (c, world, depth + 1)));
        }

        if aabb.is_empty() {
            return Err(AssetError::EmptyModel);
        }
        Ok(ModelBounds {
            aabb,
            mesh_instances,
        })
    }
}

/// Extract the JSON chunk from a binary glTF container.
fn glb_json_chunk(bytes: &[u8]) -> Result<&[u8], AssetError> {
    let read_u32 = |at: usize| -> Result<u32, AssetError> {
        bytes
            .get(at..at + 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
            .ok_or_else(|| AssetError::GltfParse("truncated GLB container".into()))
    };

    let chunk_len = read_u32(12)? as usize;
    if read_u32(16)? != GLB_CHUNK_JSON {
        return Err(AssetError::GltfParse("first GLB chunk is not JSON".into()));
    }
    bytes
        .get(20..20 + chunk_len)
        .ok_or_else(|| AssetError::GltfParse("truncated GLB JSON chunk".into()))
}
