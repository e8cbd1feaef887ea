//! Rendering interface
//!
//! The loop captures a `Frame` after every tick and hands it to a
//! `RenderSurface`, which has one routine per game phase. Surfaces only read
//! the frame; nothing flows back into the simulation.

pub mod frame;
pub mod terminal;

use std::io;

pub use frame::{DebugOverlay, Frame, Sprite, SpriteKind};
pub use terminal::TerminalSurface;

use crate::sim::GamePhase;

pub trait RenderSurface {
    fn draw_start(&mut self, frame: &Frame) -> io::Result<()>;
    fn draw_intro(&mut self, frame: &Frame) -> io::Result<()>;
    fn draw_in_progress(&mut self, frame: &Frame) -> io::Result<()>;
    fn draw_over(&mut self, frame: &Frame) -> io::Result<()>;
    fn draw_paused(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Dispatch to the routine for the frame's phase
pub fn render<R: RenderSurface + ?Sized>(surface: &mut R, frame: &Frame) -> io::Result<()> {
    match frame.phase {
        GamePhase::Start => surface.draw_start(frame),
        GamePhase::Intro => surface.draw_intro(frame),
        GamePhase::InProgress => surface.draw_in_progress(frame),
        GamePhase::Over => surface.draw_over(frame),
        GamePhase::Paused => surface.draw_paused(frame),
    }
}

/// Surface that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn draw_start(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
    fn draw_intro(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
    fn draw_in_progress(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
    fn draw_over(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
    fn draw_paused(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
}
