use bytemuck::cast_slice;
use koi::{
    pipeline::Pipeline,
    program::{A_COLOR, A_POSITION, Program},
    settings::{Dispatch, Settings},
    uniform::{MatrixLayout, Uniforms},
    vertex::{Format, Layout},
};
use koi_gpu::{VertexOutput, glam::Vec4};
use proptest::prelude::*;

fn interleaved() -> Layout {
    Layout::default()
        .binding(0, 32)
        .attribute(A_POSITION, 0, Format::Float32x4, 0)
        .attribute(A_COLOR, 0, Format::Float32x4, 16)
}

fn pack(vertices: &[([f32; 4], [f32; 4])]) -> Vec<f32> {
    vertices
        .iter()
        .flat_map(|(p, c)| p.iter().chain(c.iter()).copied())
        .collect()
}

fn draw(dispatch: Dispatch, vertices: &[f32], transform: &[f32; 16]) -> Vec<VertexOutput> {
    let settings = Settings::default().dispatch(dispatch).chunk_size(4);
    let pipeline = Pipeline::new(Program::link(interleaved()).unwrap(), settings).unwrap();

    let mut uniforms = Uniforms::default();
    uniforms.set_transform_array(transform, MatrixLayout::ColumnMajor);

    let count = (vertices.len() / 8) as u32;
    pipeline
        .draw(&[cast_slice::<f32, u8>(vertices)], &uniforms, 0, count)
        .unwrap()
}

#[rustfmt::skip]
const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

#[rustfmt::skip]
const SCALE_2: [f32; 16] = [
    2.0, 0.0, 0.0, 0.0,
    0.0, 2.0, 0.0, 0.0,
    0.0, 0.0, 2.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

#[rustfmt::skip]
const TRANSLATE_5_0_0: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    5.0, 0.0, 0.0, 1.0,
];

#[test]
fn identity_scenario() {
    let vertices = pack(&[([1.0, 2.0, 3.0, 1.0], [0.5, 0.5, 0.5, 1.0])]);
    let out = draw(Dispatch::Serial, &vertices, &IDENTITY);
    assert_eq!(out[0].clip_position, Vec4::new(1.0, 2.0, 3.0, 1.0));
    assert_eq!(out[0].color, Vec4::new(0.5, 0.5, 0.5, 1.0));
}

#[test]
fn scale_scenario() {
    let vertices = pack(&[([1.0, 1.0, 1.0, 1.0], [1.0, 0.0, 0.0, 1.0])]);
    let out = draw(Dispatch::Serial, &vertices, &SCALE_2);
    assert_eq!(out[0].clip_position, Vec4::new(2.0, 2.0, 2.0, 1.0));
}

#[test]
fn translate_scenario() {
    let vertices = pack(&[([0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0])]);
    let out = draw(Dispatch::Serial, &vertices, &TRANSLATE_5_0_0);
    assert_eq!(out[0].clip_position, Vec4::new(5.0, 0.0, 0.0, 1.0));
}

#[test]
fn anomalies_pass_through() {
    let vertices = pack(&[
        ([1.0, 1.0, 1.0, 0.0], [2.0, -1.0, f32::INFINITY, 1.0]),
        ([f32::NAN, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 0.0]),
    ]);
    let out = draw(Dispatch::Serial, &vertices, &IDENTITY);
    assert_eq!(out[0].clip_position.w, 0.0);
    assert_eq!(out[0].color, Vec4::new(2.0, -1.0, f32::INFINITY, 1.0));
    assert!(out[1].clip_position.x.is_nan());
}

fn vertex() -> impl Strategy<Value = ([f32; 4], [f32; 4])> {
    (
        prop::array::uniform4(-1000.0f32..1000.0),
        prop::array::uniform4(0.0f32..1.0),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn outputs_depend_only_on_own_inputs(
        vertices in prop::collection::vec(vertex(), 1..64),
        transform in prop::array::uniform16(-4.0f32..4.0),
        seed in any::<u64>(),
    ) {
        let forward = draw(Dispatch::Parallel, &pack(&vertices), &transform);

        // same vertices, rotated order, serial dispatch
        let shift = (seed % vertices.len() as u64) as usize;
        let mut rotated = vertices.clone();
        rotated.rotate_left(shift);
        let mut backward = draw(Dispatch::Serial, &pack(&rotated), &transform);
        backward.rotate_right(shift);

        prop_assert_eq!(&forward, &backward);

        for (i, (_, color)) in vertices.iter().enumerate() {
            let alone = draw(Dispatch::Serial, &pack(&vertices[i..=i]), &transform);
            prop_assert_eq!(alone[0], forward[i]);
            prop_assert_eq!(forward[i].color, Vec4::from_array(*color));
        }
    }
}
