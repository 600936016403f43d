#![cfg_attr(target_arch = "spirv", no_std)]

use koi_gpu::{Transform, vertex_stage};
use spirv_std::{glam::Vec4, spirv};

#[spirv(vertex)]
pub fn main_vs(
    a_position: Vec4,
    a_color: Vec4,
    #[spirv(uniform, descriptor_set = 0, binding = 0)] u_transform: &Transform,
    #[spirv(position)] gl_position: &mut Vec4,
    v_color: &mut Vec4,
) {
    let out = vertex_stage(a_position, a_color, u_transform);
    *gl_position = out.clip_position;
    *v_color = out.color;
}
