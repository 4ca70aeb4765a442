//! Typed members for the standard 2D drawing context
//!
//! One table drives three things: the method and attribute lists of
//! [`SurfaceDescriptor::context_2d`](crate::SurfaceDescriptor::context_2d),
//! the [`Context2d`] trait, and its implementation for every
//! [`SurfaceProxy`]. Typed members record exactly what a dynamic
//! [`SurfaceProxy::call`] with the same name and arguments would.
//!
//! Methods listed under `dynamic` take image or pixel handles that have no
//! typed rendition here; they are still forwarded and recorded through
//! [`SurfaceProxy::call`].

use serde_json::Value;

use crate::error::ProxyError;
use crate::surface::DrawingSurface;
use crate::SurfaceProxy;

macro_rules! context_2d {
    (
        methods {
            $( fn $fn_name:ident ( $( $arg:ident : $ty:ty ),* ) => $js:literal; )*
        }
        dynamic { $( $dyn_js:literal ),* $(,)? }
        attributes {
            $( $getter:ident / $setter:ident => $attr_js:literal; )*
        }
    ) => {
        /// Standard 2D-context methods with the arity of their typed member
        pub const CONTEXT_2D_METHODS: &[(&str, Option<usize>)] = &[
            $( ($js, Some(<[&str]>::len(&[$( stringify!($arg) ),*]))), )*
            $( ($dyn_js, None), )*
        ];

        /// The sixteen standard 2D-context style attributes
        pub const CONTEXT_2D_ATTRIBUTES: &[&str] = &[ $( $attr_js ),* ];

        /// Typed access to a 2D drawing context
        pub trait Context2d {
            type Error;

            $(
                fn $fn_name(&mut self $(, $arg: $ty)*) -> Result<Value, Self::Error>;
            )*

            $(
                fn $getter(&self) -> Result<Value, Self::Error>;
                fn $setter(&mut self, value: impl Into<Value>) -> Result<(), Self::Error>;
            )*
        }

        impl<S: DrawingSurface> Context2d for SurfaceProxy<S> {
            type Error = ProxyError<S::Error>;

            $(
                fn $fn_name(&mut self $(, $arg: $ty)*) -> Result<Value, Self::Error> {
                    self.call($js, &[$( Value::from($arg) ),*])
                }
            )*

            $(
                fn $getter(&self) -> Result<Value, Self::Error> {
                    self.get($attr_js)
                }

                fn $setter(&mut self, value: impl Into<Value>) -> Result<(), Self::Error> {
                    self.set($attr_js, value.into())
                }
            )*
        }
    };
}

context_2d! {
    methods {
        fn save() => "save";
        fn restore() => "restore";
        fn begin_path() => "beginPath";
        fn close_path() => "closePath";
        fn fill() => "fill";
        fn stroke() => "stroke";
        fn clip() => "clip";
        fn move_to(x: f64, y: f64) => "moveTo";
        fn line_to(x: f64, y: f64) => "lineTo";
        fn rect(x: f64, y: f64, width: f64, height: f64) => "rect";
        fn fill_rect(x: f64, y: f64, width: f64, height: f64) => "fillRect";
        fn stroke_rect(x: f64, y: f64, width: f64, height: f64) => "strokeRect";
        fn clear_rect(x: f64, y: f64, width: f64, height: f64) => "clearRect";
        fn arc(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, counter_clockwise: bool) => "arc";
        fn arc_to(x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) => "arcTo";
        fn ellipse(
            x: f64,
            y: f64,
            radius_x: f64,
            radius_y: f64,
            rotation: f64,
            start_angle: f64,
            end_angle: f64,
            counter_clockwise: bool
        ) => "ellipse";
        fn quadratic_curve_to(cpx: f64, cpy: f64, x: f64, y: f64) => "quadraticCurveTo";
        fn bezier_curve_to(cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) => "bezierCurveTo";
        fn translate(x: f64, y: f64) => "translate";
        fn rotate(angle: f64) => "rotate";
        fn scale(x: f64, y: f64) => "scale";
        fn transform(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) => "transform";
        fn set_transform(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) => "setTransform";
        fn reset_transform() => "resetTransform";
        fn get_transform() => "getTransform";
        fn fill_text(text: &str, x: f64, y: f64) => "fillText";
        fn stroke_text(text: &str, x: f64, y: f64) => "strokeText";
        fn measure_text(text: &str) => "measureText";
        fn set_line_dash(segments: Vec<f64>) => "setLineDash";
        fn get_line_dash() => "getLineDash";
        fn create_linear_gradient(x0: f64, y0: f64, x1: f64, y1: f64) => "createLinearGradient";
        fn create_radial_gradient(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) => "createRadialGradient";
        fn is_point_in_path(x: f64, y: f64) => "isPointInPath";
        fn is_point_in_stroke(x: f64, y: f64) => "isPointInStroke";
        fn create_image_data(width: f64, height: f64) => "createImageData";
        fn get_image_data(sx: f64, sy: f64, sw: f64, sh: f64) => "getImageData";
    }
    dynamic {
        "drawImage",
        "putImageData",
        "createPattern",
        "drawFocusIfNeeded",
    }
    attributes {
        fill_style / set_fill_style => "fillStyle";
        font / set_font => "font";
        global_alpha / set_global_alpha => "globalAlpha";
        global_composite_operation / set_global_composite_operation => "globalCompositeOperation";
        line_cap / set_line_cap => "lineCap";
        line_dash_offset / set_line_dash_offset => "lineDashOffset";
        line_join / set_line_join => "lineJoin";
        line_width / set_line_width => "lineWidth";
        miter_limit / set_miter_limit => "miterLimit";
        shadow_blur / set_shadow_blur => "shadowBlur";
        shadow_color / set_shadow_color => "shadowColor";
        shadow_offset_x / set_shadow_offset_x => "shadowOffsetX";
        shadow_offset_y / set_shadow_offset_y => "shadowOffsetY";
        stroke_style / set_stroke_style => "strokeStyle";
        text_align / set_text_align => "textAlign";
        text_baseline / set_text_baseline => "textBaseline";
    }
}
