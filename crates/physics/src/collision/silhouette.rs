//! Reference-scale sprite shapes.

use super::mask::Mask;

pub const AGENT_WIDTH: usize = 68;
pub const AGENT_HEIGHT: usize = 48;
pub const PIPE_WIDTH: usize = 104;
pub const PIPE_HEIGHT: usize = 640;
/// Rows of the full-width lip at the open end of a pipe.
pub const PIPE_LIP_HEIGHT: usize = 48;
/// Columns trimmed from each side of the pipe body below the lip.
pub const PIPE_INSET: usize = 4;

/// The three shapes a generation collides with each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Silhouettes {
    pub agent: Mask,
    /// Upper barrier, lip at the bottom edge.
    pub pipe_top: Mask,
    /// Lower barrier, lip at the top edge.
    pub pipe_bottom: Mask,
}

impl Silhouettes {
    /// Shapes at the reference scale: an elliptical agent body and a lipped
    /// pipe, the top pipe being the bottom one mirrored.
    #[must_use]
    pub fn standard() -> Self {
        let agent = agent_body(AGENT_WIDTH, AGENT_HEIGHT);
        let pipe_bottom = pipe(PIPE_WIDTH, PIPE_HEIGHT, PIPE_LIP_HEIGHT, PIPE_INSET);
        let pipe_top = pipe_bottom.flip_vertical();
        Self { agent, pipe_top, pipe_bottom }
    }

    /// Use caller-supplied shapes, e.g. masks traced from real sprites with
    /// [`Mask::from_alpha`].
    #[must_use]
    pub fn new(agent: Mask, pipe_bottom: Mask) -> Self {
        let pipe_top = pipe_bottom.flip_vertical();
        Self { agent, pipe_top, pipe_bottom }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn agent_height(&self) -> f32 {
        self.agent.height() as f32
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pipe_width(&self) -> f32 {
        self.pipe_bottom.width() as f32
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pipe_height(&self) -> f32 {
        self.pipe_top.height() as f32
    }
}

impl Default for Silhouettes {
    fn default() -> Self {
        Self::standard()
    }
}

#[allow(clippy::cast_precision_loss)]
fn agent_body(width: usize, height: usize) -> Mask {
    let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
    Mask::from_fn(width, height, |x, y| {
        let nx = (x as f32 + 0.5 - rx) / rx;
        let ny = (y as f32 + 0.5 - ry) / ry;
        nx * nx + ny * ny <= 1.0
    })
}

fn pipe(width: usize, height: usize, lip: usize, inset: usize) -> Mask {
    Mask::from_fn(width, height, |x, y| {
        y < lip || (x >= inset && x < width.saturating_sub(inset))
    })
}
