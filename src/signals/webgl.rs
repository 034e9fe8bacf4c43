//! Canvas and WebGL placeholders
//!
//! No rasterization happens here. Both fields are data URIs built from a fixed
//! PNG prefix plus a per-call token, and the WebGL one also carries a fixed
//! capability string describing a stock Chromium WebGL 1.0 context.
//!
//! # Example
//!
//! ```rust
//! use adyen_fingerprint::signals::webgl::{canvas_data_uri, CANVAS_DATA_URI_PREFIX};
//!
//! let uri = canvas_data_uri("token");
//! assert!(uri.starts_with(CANVAS_DATA_URI_PREFIX));
//! assert!(uri.ends_with("token"));
//! ```

use once_cell::sync::Lazy;

/// Header of the PNG data URI both placeholders start with.
pub const CANVAS_DATA_URI_PREFIX: &str =
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAASwAAACWCAYAAABkW7XSAAAAAXNSR0IArs4c6QAA";

/// Extensions reported by `getSupportedExtensions()`, in reported order.
const CHROMIUM_EXTENSIONS: [&str; 31] = [
    "ANGLE_instanced_arrays",
    "EXT_blend_minmax",
    "EXT_color_buffer_half_float",
    "EXT_depth_clamp",
    "EXT_disjoint_timer_query",
    "EXT_float_blend",
    "EXT_frag_depth",
    "EXT_shader_texture_lod",
    "EXT_texture_compression_bptc",
    "EXT_texture_compression_rgtc",
    "EXT_texture_filter_anisotropic",
    "EXT_sRGB",
    "KHR_parallel_shader_compile",
    "OES_element_index_uint",
    "OES_fbo_render_mipmap",
    "OES_standard_derivatives",
    "OES_texture_float",
    "OES_texture_float_linear",
    "OES_texture_half_float",
    "OES_texture_half_float_linear",
    "OES_vertex_array_object",
    "WEBGL_color_buffer_float",
    "WEBGL_compressed_texture_s3tc",
    "WEBGL_compressed_texture_s3tc_srgb",
    "WEBGL_debug_renderer_info",
    "WEBGL_debug_shaders",
    "WEBGL_depth_texture",
    "WEBGL_draw_buffers",
    "WEBGL_lose_context",
    "WEBGL_multi_draw",
    "WEBGL_polygon_mode",
];

static CHROMIUM_CAPABILITIES: Lazy<String> =
    Lazy::new(|| WebGlCapabilities::chromium().to_capability_string());

/// The WebGL context description appended after the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebGlCapabilities {
    /// Leading marker; kept byte-for-byte, it is part of the hashed input.
    pub marker: String,
    /// Concatenated numeric `getParameter` results.
    pub parameters: String,
    /// RENDERER string
    pub renderer: String,
    /// SHADING_LANGUAGE_VERSION string
    pub shading_language_version: String,
    /// STENCIL_BITS
    pub stencil_bits: u8,
    /// VENDOR string
    pub vendor: String,
    /// VERSION string
    pub version: String,
    /// Supported extension names
    pub extensions: Vec<String>,
}

impl WebGlCapabilities {
    /// Stock Chromium WebGL 1.0 context.
    pub fn chromium() -> Self {
        Self {
            marker: "ยง".to_string(),
            parameters: "88824812102565534321638410241638416163843016164095".to_string(),
            renderer: "WebKit WebGL".to_string(),
            shading_language_version: "WebGL GLSL ES 1.0 (OpenGL ES GLSL ES 1.0 Chromium)"
                .to_string(),
            stencil_bits: 0,
            vendor: "WebKit".to_string(),
            version: "WebGL 1.0 (OpenGL ES 2.0 Chromium)".to_string(),
            extensions: CHROMIUM_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn to_capability_string(&self) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(&self.marker);
        out.push_str(&self.parameters);
        out.push_str(&self.renderer);
        out.push_str(&self.shading_language_version);
        out.push_str(&self.stencil_bits.to_string());
        out.push_str(&self.vendor);
        out.push_str(&self.version);
        for extension in &self.extensions {
            out.push_str(extension);
        }
        out
    }
}

impl Default for WebGlCapabilities {
    fn default() -> Self {
        Self::chromium()
    }
}

/// Canvas placeholder for one call.
pub fn canvas_data_uri(token: &str) -> String {
    format!("{CANVAS_DATA_URI_PREFIX}{token}")
}

/// WebGL placeholder for one call, using the stock Chromium capabilities.
pub fn webgl_data_uri(token: &str) -> String {
    format!(
        "{CANVAS_DATA_URI_PREFIX}{token}{}",
        CHROMIUM_CAPABILITIES.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_field, RawValue};

    const ZERO_TOKEN: &str = "00000000-0000-0000-0000-000000000000";

    #[test]
    fn test_capability_string_shape() {
        let caps = WebGlCapabilities::chromium().to_capability_string();
        assert!(caps.starts_with("ยง8882481210"));
        assert!(caps.contains("WebKit WebGLWebGL GLSL ES 1.0"));
        assert!(caps.contains("Chromium)0WebKitWebGL 1.0"));
        assert!(caps.ends_with("WEBGL_multi_drawWEBGL_polygon_mode"));
        assert_eq!(caps.chars().count(), 833);
    }

    #[test]
    fn test_canvas_encoding_with_fixed_token() {
        let raw = RawValue::hashed(canvas_data_uri(ZERO_TOKEN));
        assert_eq!(encode_field(&raw, 10), "8Hb2ewkhpo");
    }

    #[test]
    fn test_webgl_encoding_with_fixed_token() {
        let raw = RawValue::hashed(webgl_data_uri(ZERO_TOKEN));
        assert_eq!(encode_field(&raw, 10), "Sm6AKNPGWp");
    }

    #[test]
    fn test_token_changes_output() {
        assert_ne!(canvas_data_uri("a"), canvas_data_uri("b"));
        assert_ne!(webgl_data_uri("a"), webgl_data_uri("b"));
    }
}
