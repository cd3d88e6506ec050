//! Window host for the glview demos.
//!
//! This crate ties together [`glview_core`] (state and math) and
//! [`glview_gl`] (programs and GL resources) behind a glium/winit window.
//!
//! # Overview
//!
//! - [`Demo`] is the trait each demo implements.
//! - [`FrameInput`] is what a demo gets every redraw.
//! - [`run_demo`] opens the window, builds the demo and runs the event loop.
//! - [`keymap`] maps keys and mouse buttons to
//!   [`InputEvent`](glview_core::InputEvent)s.

pub mod demo;
pub mod keymap;
pub mod runner;

pub use demo::{Demo, FrameInput};
pub use runner::run_demo;
