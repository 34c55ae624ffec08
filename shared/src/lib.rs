#![no_std]

pub use bytemuck;

/// Draw the parameter-space (Mandelbrot-style) set.
pub const FLAG_MANDELBROT: u32 = 0x01;
/// Draw the dynamics-space (Julia-style) set for `FrameParams::julia`.
pub const FLAG_JULIA: u32 = 0x02;
/// Use the colour palette instead of grayscale.
pub const FLAG_COLOR: u32 = 0x04;

/// Per-frame parameter block pushed to the fractal shader.
///
/// Field order matches the WGSL `Params` struct, every `[f32; 2]` sits on an
/// 8-byte boundary and the size is a multiple of 8.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameParams {
    pub resolution: [f32; 2],
    pub camera: [f32; 2],
    pub julia: [f32; 2],
    pub zoom: f32,
    pub flags: u32,
    pub iterations: u32,
    pub frame: u32,
    pub system: u32,
    pub normalized: u32,
    /// Squared bailout radius for escape-time coloring.
    pub escape_radius_sq: f32,
    pub _pad: u32,
}
