use gltf::json;
use gltf::json::validation::{Checked, USize64};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use trajectoid::{Figure, MeshLayer, Trajectoids};

/// One triangle list with its own material.
struct Layer {
    name: String,
    color: [f32; 4],
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

struct GltfBuilder {
    layers: Vec<Layer>,
}

fn pad_to_four(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

fn view(
    offset: usize,
    length: usize,
    stride: Option<usize>,
    target: json::buffer::Target,
) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64(length as u64),
        byte_offset: Some(USize64(offset as u64)),
        byte_stride: stride.map(json::buffer::Stride),
        name: None,
        target: Some(Checked::Valid(target)),
        extensions: Default::default(),
        extras: Default::default(),
    }
}

fn accessor(
    view: u32,
    count: usize,
    component: json::accessor::ComponentType,
    type_: json::accessor::Type,
    bounds: Option<([f32; 3], [f32; 3])>,
) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(json::Index::new(view)),
        byte_offset: Some(USize64(0)),
        count: USize64(count as u64),
        component_type: Checked::Valid(json::accessor::GenericComponentType(component)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Checked::Valid(type_),
        min: bounds.map(|(min, _)| json::Value::from(Vec::from(min))),
        max: bounds.map(|(_, max)| json::Value::from(Vec::from(max))),
        name: None,
        normalized: false,
        sparse: None,
    }
}

impl GltfBuilder {
    fn new() -> Self {
        Self { layers: Vec::new() }
    }

    fn add_layer(&mut self, layer: &MeshLayer) {
        let mut color = layer.color.to_array();
        color[3] = color[3].min(0.6);
        self.layers.push(Layer {
            name: layer.label.clone(),
            color,
            positions: layer
                .mesh
                .vertices
                .iter()
                .map(|v| [v[0] as f32, v[1] as f32, v[2] as f32])
                .collect(),
            indices: layer.mesh.flat_faces(),
        });
    }

    fn save(&self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut buffer_data = Vec::new();
        let mut buffer_views = Vec::new();
        let mut accessors = Vec::new();
        let mut materials = Vec::new();
        let mut primitives = Vec::new();

        for (i, layer) in self.layers.iter().enumerate() {
            // Positions (Vec3 f32)
            pad_to_four(&mut buffer_data);
            let pos_offset = buffer_data.len();
            for p in &layer.positions {
                for c in p {
                    buffer_data.write_all(&c.to_le_bytes())?;
                }
            }
            let pos_len = buffer_data.len() - pos_offset;

            // Indices (Scalar u32)
            pad_to_four(&mut buffer_data);
            let ind_offset = buffer_data.len();
            for index in &layer.indices {
                buffer_data.write_all(&index.to_le_bytes())?;
            }
            let ind_len = buffer_data.len() - ind_offset;

            let mut min = [f32::MAX; 3];
            let mut max = [f32::MIN; 3];
            for p in &layer.positions {
                for k in 0..3 {
                    min[k] = min[k].min(p[k]);
                    max[k] = max[k].max(p[k]);
                }
            }

            let pos_view = buffer_views.len() as u32;
            buffer_views.push(view(
                pos_offset,
                pos_len,
                Some(12),
                json::buffer::Target::ArrayBuffer,
            ));
            buffer_views.push(view(
                ind_offset,
                ind_len,
                None,
                json::buffer::Target::ElementArrayBuffer,
            ));

            let pos_accessor = accessors.len() as u32;
            accessors.push(accessor(
                pos_view,
                layer.positions.len(),
                json::accessor::ComponentType::F32,
                json::accessor::Type::Vec3,
                Some((min, max)),
            ));
            accessors.push(accessor(
                pos_view + 1,
                layer.indices.len(),
                json::accessor::ComponentType::U32,
                json::accessor::Type::Scalar,
                None,
            ));

            materials.push(json::Material {
                alpha_cutoff: None,
                alpha_mode: Checked::Valid(json::material::AlphaMode::Blend),
                double_sided: true,
                name: Some(layer.name.clone()),
                pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                    base_color_factor: json::material::PbrBaseColorFactor(layer.color),
                    metallic_factor: json::material::StrengthFactor(0.0),
                    roughness_factor: json::material::StrengthFactor(0.5),
                    ..Default::default()
                },
                ..Default::default()
            });

            primitives.push(json::mesh::Primitive {
                attributes: {
                    let mut map = BTreeMap::new();
                    map.insert(
                        Checked::Valid(json::mesh::Semantic::Positions),
                        json::Index::new(pos_accessor),
                    );
                    map
                },
                extensions: Default::default(),
                extras: Default::default(),
                indices: Some(json::Index::new(pos_accessor + 1)),
                material: Some(json::Index::new(i as u32)),
                mode: Checked::Valid(json::mesh::Mode::Triangles),
                targets: None,
            });
        }

        let buffer = json::Buffer {
            byte_length: USize64(buffer_data.len() as u64),
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
        };

        let mesh = json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            primitives,
            weights: None,
        };

        let node = json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(json::Index::new(0)),
            name: None,
            rotation: None,
            scale: None,
            skin: None,
            translation: None,
            weights: None,
        };

        let root = json::Root {
            accessors,
            animations: vec![],
            asset: json::Asset {
                generator: Some("trajectoid example".to_string()),
                version: "2.0".to_string(),
                ..Default::default()
            },
            buffers: vec![buffer],
            buffer_views,
            cameras: vec![],
            extensions: Default::default(),
            extensions_used: vec![],
            extensions_required: vec![],
            extras: Default::default(),
            images: vec![],
            materials,
            meshes: vec![mesh],
            nodes: vec![node],
            samplers: vec![],
            scene: Some(json::Index::new(0)),
            scenes: vec![json::Scene {
                extensions: Default::default(),
                extras: Default::default(),
                name: None,
                nodes: vec![json::Index::new(0)],
            }],
            skins: vec![],
            textures: vec![],
        };

        let json_string = json::serialize::to_string(&root)?;
        let mut json_bytes = json_string.into_bytes();

        // Pad JSON to 4 bytes with spaces
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(0x20);
        }
        pad_to_four(&mut buffer_data);

        let total_length = 12 + 8 + json_bytes.len() as u32 + 8 + buffer_data.len() as u32;

        let mut file = File::create(filename)?;

        // Header
        file.write_all(b"glTF")?;
        file.write_all(&2u32.to_le_bytes())?;
        file.write_all(&total_length.to_le_bytes())?;

        // JSON Chunk
        file.write_all(&(json_bytes.len() as u32).to_le_bytes())?;
        file.write_all(b"JSON")?;
        file.write_all(&json_bytes)?;

        // BIN Chunk
        file.write_all(&(buffer_data.len() as u32).to_le_bytes())?;
        file.write_all(b"BIN\0")?;
        file.write_all(&buffer_data)?;

        Ok(())
    }
}

fn generate_gltf(figure: &Figure, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = GltfBuilder::new();
    for layer in &figure.meshes {
        builder.add_layer(layer);
    }
    builder.save(filename)?;
    println!("Output saved to {}", filename);
    Ok(())
}

pub fn run(trajectoids: &Trajectoids) -> Result<(), Box<dyn std::error::Error>> {
    generate_gltf(&trajectoids.hull_figure(), "trajectoid_rounded_hull.glb")?;
    generate_gltf(&trajectoids.star_figure(), "trajectoid_star_body.glb")?;
    generate_gltf(&trajectoids.tube_figure(), "trajectoid_tube.glb")?;
    Ok(())
}
