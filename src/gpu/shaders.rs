/// WGSL shader code for real-time hue rotation
///
/// The vertex and fragment stages live in separate modules so a compile
/// error can be reported against the stage that caused it. Both declare the
/// same `Uniforms` struct and `VertexOutput` interface.

/// Vertex shader
///
/// Maps pixel-space positions (0..width, 0..height) to clip space using the
/// image resolution, flipping y so (0, 0) is the top-left corner.
pub const VERTEX_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,  // Image natural size in pixels
    hue: f32,               // Hue shift in turns [0, 1]
    padding: f32,           // Padding for 16-byte alignment
}

@group(0) @binding(2)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coords: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;

    let zero_to_one = input.position / uniforms.resolution;
    let zero_to_two = zero_to_one * 2.0;
    let clip_space = zero_to_two - 1.0;

    output.clip_position = vec4<f32>(clip_space * vec2<f32>(1.0, -1.0), 0.0, 1.0);
    output.tex_coords = input.tex_coords;

    return output;
}
"#;

/// Fragment shader
///
/// Per texel: RGB -> HSV, add the hue shift modulo 1.0, HSV -> RGB.
/// Saturation and value are untouched and alpha is forced to 1.
pub const FRAGMENT_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    hue: f32,
    padding: f32,
}

@group(0) @binding(0)
var input_texture: texture_2d<f32>;

@group(0) @binding(1)
var texture_sampler: sampler;  // Nearest, clamp-to-edge

@group(0) @binding(2)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
}

// Branchless RGB -> HSV, all components in [0, 1]
fn rgb2hsv(c: vec3<f32>) -> vec3<f32> {
    let k = vec4<f32>(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    let p = mix(vec4<f32>(c.bg, k.wz), vec4<f32>(c.gb, k.xy), vec4<f32>(step(c.b, c.g)));
    let q = mix(vec4<f32>(p.xyw, c.r), vec4<f32>(c.r, p.yzx), vec4<f32>(step(p.x, c.r)));

    let d = q.x - min(q.w, q.y);
    let e = 1.0e-10;
    return vec3<f32>(abs(q.z + (q.w - q.y) / (6.0 * d + e)), d / (q.x + e), q.x);
}

// HSV -> RGB, all components in [0, 1]
fn hsv2rgb(c: vec3<f32>) -> vec3<f32> {
    let k = vec4<f32>(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    let p = abs(fract(c.xxx + k.xyz) * 6.0 - k.www);
    return c.z * mix(k.xxx, clamp(p - k.xxx, vec3<f32>(0.0), vec3<f32>(1.0)), vec3<f32>(c.y));
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(input_texture, texture_sampler, input.tex_coords);

    var hsv = rgb2hsv(color.rgb);
    hsv.x = fract(hsv.x + uniforms.hue);

    return vec4<f32>(hsv2rgb(hsv), 1.0);
}
"#;

/// Entry points
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";
