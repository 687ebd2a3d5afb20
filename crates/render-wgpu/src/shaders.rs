use cubeview_assets::ShaderSource;

pub const VS_ENTRY: &str = "vs_main";
pub const FS_ENTRY: &str = "fs_main";

/// WGSL shader for textured cubes under a camera-mounted spotlight.
pub const LIGHTING_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_pos: vec4<f32>,
    light_position: vec4<f32>,
    light_direction: vec4<f32>,
    light_ambient: vec4<f32>,
    light_diffuse: vec4<f32>,
    light_specular: vec4<f32>,
    // x: cosine of the cut-off angle, y: material shininess
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var diffuse_map: texture_2d<f32>;
@group(1) @binding(1)
var specular_map: texture_2d<f32>;
@group(1) @binding(2)
var material_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world;
    out.world_pos = world.xyz;
    out.normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let diffuse_texel = textureSample(diffuse_map, material_sampler, in.uv).rgb;
    let specular_texel = textureSample(specular_map, material_sampler, in.uv).rgb;

    let ambient = uniforms.light_ambient.rgb * diffuse_texel;
    let light_dir = normalize(uniforms.light_position.xyz - in.world_pos);
    let theta = dot(light_dir, normalize(-uniforms.light_direction.xyz));
    if (theta <= uniforms.params.x) {
        return vec4<f32>(ambient, 1.0);
    }

    let norm = normalize(in.normal);
    let diff = max(dot(norm, light_dir), 0.0);
    let diffuse = uniforms.light_diffuse.rgb * diff * diffuse_texel;

    let view_dir = normalize(uniforms.view_pos.xyz - in.world_pos);
    let reflect_dir = reflect(-light_dir, norm);
    let highlight = pow(max(dot(view_dir, reflect_dir), 0.0), uniforms.params.y);
    let specular = uniforms.light_specular.rgb * highlight * specular_texel;

    return vec4<f32>(ambient + diffuse + specular, 1.0);
}
"#;

/// The embedded lighting shader as a loadable source.
pub fn builtin_shader() -> ShaderSource {
    ShaderSource::new("builtin:lighting.wgsl", LIGHTING_SHADER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_assets::ShaderStage;

    #[test]
    fn builtin_declares_entry_points() {
        let source = builtin_shader();
        assert!(source.has_entry_point(ShaderStage::Vertex, VS_ENTRY));
        assert!(source.has_entry_point(ShaderStage::Fragment, FS_ENTRY));
    }
}
