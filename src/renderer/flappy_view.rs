//! Side view of the pipe game

use glam::Vec2;

use super::Frame;
use super::shapes::rect;
use super::vertex::colors;
use crate::consts::flappy::{PIPE_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{FlappyState, GamePhase, Viewport};

/// Rim drawn at the mouth of each pipe
const RIM_HEIGHT: f32 = 12.0;
const RIM_OVERHANG: f32 = 4.0;

pub fn draw_flappy(state: &FlappyState) -> Frame {
    let mut frame = Frame::new(Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let out = &mut frame.vertices;

    rect(out, Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), colors::SKY);

    if state.phase == GamePhase::Menu {
        return frame;
    }

    for pipe in &state.pipes {
        // Upper pipe
        rect(out, Vec2::new(pipe.x, 0.0), Vec2::new(PIPE_WIDTH, pipe.gap_top), colors::PIPE);
        rect(
            out,
            Vec2::new(pipe.x - RIM_OVERHANG, pipe.gap_top - RIM_HEIGHT),
            Vec2::new(PIPE_WIDTH + RIM_OVERHANG * 2.0, RIM_HEIGHT),
            colors::PIPE_RIM,
        );
        // Lower pipe
        let bottom = pipe.gap_bottom();
        rect(
            out,
            Vec2::new(pipe.x, bottom),
            Vec2::new(PIPE_WIDTH, SCREEN_HEIGHT - bottom),
            colors::PIPE,
        );
        rect(
            out,
            Vec2::new(pipe.x - RIM_OVERHANG, bottom),
            Vec2::new(PIPE_WIDTH + RIM_OVERHANG * 2.0, RIM_HEIGHT),
            colors::PIPE_RIM,
        );
    }

    let bird_color = if state.phase == GamePhase::GameOver {
        colors::BIRD_DEAD
    } else {
        colors::BIRD
    };
    rect(out, state.bird.pos, Vec2::splat(state.bird.size), bird_color);

    frame
}
