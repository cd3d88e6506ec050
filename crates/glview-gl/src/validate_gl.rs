//! Reset and check the state of the OpenGL context between frames.

use tracing::warn;

/// Unbind everything a frame may have left bound so the next frame (or the
/// windowing library) starts from defaults.
///
/// The shared vertex array bound by [`RawGl::load`](crate::RawGl::load)
/// stays bound.
///
/// # Safety
///
/// Must be called with a valid OpenGL context current.
pub unsafe fn gl_reset() {
    gl::UseProgram(0);

    let mut num_units = 0;
    gl::GetIntegerv(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut num_units);
    for unit in 0..num_units.max(0) as u32 {
        gl::ActiveTexture(gl::TEXTURE0 + unit);
        gl::BindTexture(gl::TEXTURE_2D, 0);
    }
    gl::ActiveTexture(gl::TEXTURE0);

    gl::BindBuffer(gl::ARRAY_BUFFER, 0);
    gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
    gl::Disable(gl::CULL_FACE);
    gl::Disable(gl::BLEND);
    gl::BlendFunc(gl::ONE, gl::ZERO);
}

/// Pop and log every pending GL error. Returns how many there were.
///
/// # Safety
///
/// Must be called with a valid OpenGL context current.
pub unsafe fn drain_errors() -> usize {
    let mut count = 0;
    loop {
        let code = gl::GetError();
        if code == gl::NO_ERROR {
            return count;
        }
        warn!("GL error 0x{code:04X}");
        count += 1;
        // A lost context keeps reporting; stop eventually.
        if count >= 32 {
            return count;
        }
    }
}
