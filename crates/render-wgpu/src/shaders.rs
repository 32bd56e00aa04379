/// WGSL shader for instanced scene boxes under hemisphere, directional and
/// ambient light.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    // xyz: unit vector toward the light, w: intensity
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
    // rgb: colour, a: intensity
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    ambient: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    // Boxes are scaled non-uniformly but only ever rotated about Y, so
    // normalizing the transformed normal keeps face normals exact.
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let sky_weight = n.y * 0.5 + 0.5;
    let hemi = mix(uniforms.hemi_ground.rgb, uniforms.hemi_sky.rgb, sky_weight)
        * uniforms.hemi_sky.a;
    let diffuse = max(dot(n, uniforms.light_dir.xyz), 0.0)
        * uniforms.light_dir.w
        * uniforms.light_color.rgb;
    let ambient = uniforms.ambient.rgb * uniforms.ambient.a;
    let lighting = (hemi + diffuse + ambient) * 0.5;
    return vec4<f32>(min(in.color.rgb * lighting, vec3<f32>(1.0)), in.color.a);
}
"#;
