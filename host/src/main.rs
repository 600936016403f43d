use std::{error::Error, f32::consts::PI};

use bytemuck::cast_slice;
use koi::{
    gpu::{
        Transform,
        glam::{Mat4, Vec3},
    },
    pipeline::Pipeline,
    program::{A_COLOR, A_POSITION, Program},
    settings::Settings,
    uniform::Uniforms,
    vertex::{Format, Layout},
};
use log::info;

const POSITIONS: [[f32; 3]; 3] = [[0.6, 0.75, 0.0], [-0.6, 0.75, 0.0], [0.0, -0.75, 0.0]];
const COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];
const INDICES: [u32; 3] = [0, 1, 2];

const FRAMES: u32 = 4;

struct Camera {
    projection: Mat4,
    view: Mat4,
}

impl Camera {
    fn new(aspect: f32) -> Self {
        Self {
            projection: Mat4::perspective_rh_gl(30.0_f32.to_radians(), aspect, 1.0, 2000.0),
            view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
        }
    }

    fn transform(&self, phi: f32) -> Transform {
        Transform::new(self.projection * self.view * Mat4::from_rotation_y(phi))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = Settings::from_env()?;

    // a_position as 3 floats, a_color as normalized rgb bytes, one buffer each
    let layout = Layout::default()
        .binding(0, 0)
        .binding(1, 0)
        .attribute(A_POSITION, 0, Format::Float32x3, 0)
        .attribute(A_COLOR, 1, Format::Unorm8x3, 0);

    let pipeline = Pipeline::new(Program::link(layout)?, settings)?;
    let buffers: [&[u8]; 2] = [cast_slice(&POSITIONS), cast_slice(&COLORS)];

    let camera = Camera::new(16.0 / 9.0);
    let mut uniforms = Uniforms::default();

    for frame in 0..FRAMES {
        let phi = frame as f32 * PI / FRAMES as f32;
        uniforms.set_transform(camera.transform(phi));

        let outputs = pipeline.draw_indexed(&buffers, &uniforms, &INDICES)?;

        info!("frame {frame}: phi = {phi:.3}");
        for (index, output) in INDICES.iter().zip(&outputs) {
            info!(
                "  vertex {index}: gl_Position = {}, v_color = {}",
                output.clip_position, output.color
            );
        }
    }

    Ok(())
}
